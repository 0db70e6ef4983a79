use core_types::CoreError;
use thiserror::Error;

/// Errors that reach the caller of the aggregator.
///
/// Data-quality problems never show up here: they become null cells.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Row {row} has an unreadable timestamp: {source}")]
    InvalidTimestamp {
        row: usize,
        #[source]
        source: CoreError,
    },

    #[error("Price series columns are misaligned: {dates} timestamps but {closes} closes")]
    ColumnLengthMismatch { dates: usize, closes: usize },

    #[error("Invalid input: {0}")]
    Core(#[from] CoreError),
}
