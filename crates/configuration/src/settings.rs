use crate::error::ConfigError;
use chrono_tz::Tz;
use core_types::IndicatorId;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// IANA timezone the series and window boundaries are expressed in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Active indicators, in reporting order. Each may appear only once.
    #[serde(default = "default_indicators")]
    pub indicators: Vec<IndicatorId>,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub report: Report,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    /// Default filter directive when `RUST_LOG` is unset (e.g. "info", "analytics=debug").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

/// Result output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Report {
    /// Where to save the JSON results when no `--output` is given.
    pub output_path: Option<PathBuf>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_indicators() -> Vec<IndicatorId> {
    IndicatorId::ALL.to_vec()
}

fn default_log_level() -> String {
    "info".to_string()
}

// --- Default Implementations ---
// These let a user run without any config.toml at all.

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            indicators: default_indicators(),
            logging: Logging::default(),
            report: Report::default(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

impl Config {
    /// Checks the settings that deserialization alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_timezone(&self.timezone)?;

        if self.indicators.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one indicator must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = self.indicators.iter().find(|id| !seen.insert(**id)) {
            return Err(ConfigError::ValidationError(format!(
                "indicator '{}' is listed more than once",
                duplicate
            )));
        }

        Ok(())
    }

    /// The configured working timezone.
    pub fn working_timezone(&self) -> Result<Tz, ConfigError> {
        parse_timezone(&self.timezone)
    }
}

/// Resolves a timezone name. "UTC" is accepted in any letter case.
pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("UTC") {
        return Ok(Tz::UTC);
    }
    name.parse::<Tz>().map_err(|e| ConfigError::UnknownTimezone {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.working_timezone().unwrap(), Tz::UTC);
        assert_eq!(config.indicators, IndicatorId::ALL.to_vec());
        assert_eq!(config.logging.level, "info");
        assert!(config.report.output_path.is_none());
    }

    #[test]
    fn timezone_names_resolve() {
        assert_eq!(parse_timezone("utc").unwrap(), Tz::UTC);
        assert_eq!(parse_timezone("Europe/Paris").unwrap(), Tz::Europe__Paris);
        assert!(matches!(
            parse_timezone("Mars/Olympus"),
            Err(ConfigError::UnknownTimezone { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_and_empty_indicator_lists() {
        let duplicated = Config {
            indicators: vec![IndicatorId::Volatility, IndicatorId::Performance, IndicatorId::Volatility],
            ..Config::default()
        };
        let err = duplicated.validate().unwrap_err();
        assert!(err.to_string().contains("volatility"));

        let empty = Config {
            indicators: vec![],
            ..Config::default()
        };
        assert!(empty.validate().is_err());
    }
}
