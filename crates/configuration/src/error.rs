use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Unknown timezone '{name}': {reason}")]
    UnknownTimezone { name: String, reason: String },

    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}
