use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Timestamp '{0}' cannot be interpreted as a date or date-time")]
    InvalidTimestamp(String),

    #[error("Unknown indicator '{0}'")]
    UnknownIndicator(String),
}
