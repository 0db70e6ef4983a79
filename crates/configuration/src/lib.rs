use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Logging, Report, parse_timezone};

/// Default configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable that overrides the configured timezone.
pub const TIMEZONE_ENV: &str = "TIMEZONE";

/// Loads the application configuration from `config.toml` in the working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new(CONFIG_FILE))
}

/// Loads and validates the configuration from `path`.
///
/// The file is optional; any setting it omits falls back to its default.
/// A `TIMEZONE` environment variable takes precedence over the file.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    load_with_timezone_override(path, std::env::var(TIMEZONE_ENV).ok())
}

fn load_with_timezone_override(
    path: &Path,
    timezone: Option<String>,
) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .set_override_option("timezone", timezone)?
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), timezone = %config.timezone, "Loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::IndicatorId;
    use std::fs;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_with_timezone_override(&dir.path().join("absent.toml"), None).unwrap();
        assert_eq!(config.timezone, "UTC");
        assert_eq!(config.indicators, IndicatorId::ALL.to_vec());
    }

    #[test]
    fn reads_every_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
timezone = "Europe/Paris"
indicators = ["max_drawdown", "performance"]

[logging]
level = "debug"
directory = "logs"

[report]
output_path = "out/results.json"
"#,
        )
        .unwrap();

        let config = load_with_timezone_override(&path, None).unwrap();
        assert_eq!(config.timezone, "Europe/Paris");
        assert_eq!(
            config.indicators,
            vec![IndicatorId::MaxDrawdown, IndicatorId::Performance]
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.directory.as_deref(), Some(Path::new("logs")));
        assert_eq!(
            config.report.output_path.as_deref(),
            Some(Path::new("out/results.json"))
        );
    }

    #[test]
    fn environment_timezone_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timezone = \"Europe/Paris\"\n").unwrap();

        let config =
            load_with_timezone_override(&path, Some("America/New_York".to_string())).unwrap();
        assert_eq!(config.timezone, "America/New_York");
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        fs::write(&path, "timezone = \"Nowhere/Special\"\n").unwrap();
        assert!(matches!(
            load_with_timezone_override(&path, None),
            Err(ConfigError::UnknownTimezone { .. })
        ));

        fs::write(&path, "indicators = [\"sharpe\"]\n").unwrap();
        assert!(matches!(
            load_with_timezone_override(&path, None),
            Err(ConfigError::LoadError(_))
        ));
    }
}
