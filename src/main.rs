use analytics::{IndicatorAggregator, derive_windows};
use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::settings::Config;
use configuration::{load_config, load_config_from};
use core_types::{IndicatorId, parse_timestamp};
use indicators::create_indicators;
use std::path::PathBuf;

mod loader;
mod output;
mod telemetry;

/// The main entry point for the Meridian application.
fn main() -> anyhow::Result<()> {
    // A .env file is optional; variables already in the environment still apply.
    let dotenv = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .context("Failed to load configuration")?;

    let _log_guard = telemetry::init_logging(&config.logging)?;
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded environment from .env");
    }

    // Execute the appropriate command
    match cli.command {
        Commands::Compute(args) => handle_compute(args, config),
        Commands::Windows(args) => handle_windows(args, config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Trailing-window performance indicators for a single security.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (defaults to ./config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute every indicator over every trailing window of a price history.
    Compute(ComputeArgs),
    /// Print the trailing window boundaries for an as-of date.
    Windows(WindowsArgs),
}

#[derive(Parser)]
struct ComputeArgs {
    /// CSV file with `Date` and `Close` columns.
    #[arg(long)]
    input: PathBuf,

    /// Window end (e.g., "2025-04-01" or RFC 3339). Defaults to the last date in the input.
    #[arg(long)]
    as_of: Option<String>,

    /// Working timezone, overriding the configuration (e.g., "Europe/Paris").
    #[arg(long)]
    timezone: Option<String>,

    /// Indicators to compute, overriding the configuration (comma separated).
    #[arg(long = "indicator", value_delimiter = ',')]
    indicators: Vec<IndicatorId>,

    /// Save the results as JSON to this path.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Do not print the results table.
    #[arg(long)]
    no_print: bool,
}

#[derive(Parser)]
struct WindowsArgs {
    /// Window end. Defaults to today at midnight UTC.
    #[arg(long)]
    as_of: Option<String>,

    /// Working timezone, overriding the configuration.
    #[arg(long)]
    timezone: Option<String>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Loads the price history, runs the aggregator, then prints and saves the results.
fn handle_compute(args: ComputeArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(timezone) = args.timezone {
        config.timezone = timezone;
    }
    if !args.indicators.is_empty() {
        config.indicators = args.indicators;
    }
    config.validate()?;

    let timezone = config.working_timezone()?;
    let as_of = args
        .as_of
        .as_deref()
        .map(parse_timestamp)
        .transpose()
        .context("Invalid --as-of")?;

    let series = loader::load_price_csv(&args.input)?;
    tracing::info!(
        input = %args.input.display(),
        rows = series.len(),
        %timezone,
        "Loaded price history"
    );

    let aggregator = IndicatorAggregator::new(create_indicators(&config.indicators), timezone);
    let results = aggregator
        .compute_all(Some(&series), as_of.as_ref())
        .with_context(|| format!("Cannot compute indicators for {}", args.input.display()))?;

    if !args.no_print {
        println!("{}", output::render_results(&results, &aggregator.indicator_names()));
    }

    if let Some(path) = args.output.or(config.report.output_path) {
        output::save_json(&results, &path)?;
        println!("Results saved to {}", path.display());
    }

    Ok(())
}

/// Prints the derived window boundaries, expressed in the working timezone.
fn handle_windows(args: WindowsArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(timezone) = args.timezone {
        config.timezone = timezone;
    }
    let timezone = config.working_timezone()?;
    let as_of = args
        .as_of
        .as_deref()
        .map(parse_timestamp)
        .transpose()
        .context("Invalid --as-of")?;

    let windows = derive_windows(as_of.as_ref(), timezone)?;
    println!("{}", output::render_windows(&windows));
    Ok(())
}
