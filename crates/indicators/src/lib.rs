//! # Indicator Library
//!
//! This crate holds the metrics that reduce a window of prices to a single
//! number. It defines a universal `Indicator` trait and the four built-in
//! implementations.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate. It knows nothing about windows,
//!   timezones or where the prices came from. It depends only on `core-types`.
//! - **Indicator Agnostic Aggregation:** Through the `Indicator` trait the
//!   aggregator can run any indicator without knowing its formula.
//! - **Extensibility:** Adding an indicator means a new module implementing
//!   `Indicator`, a new `IndicatorId` variant and a factory arm.
//!
//! ## Public API
//!
//! - `Indicator`: The core trait all indicators implement.
//! - `create_indicator` / `create_indicators`: The factory functions.
//! - The concrete indicator structs (e.g., `Performance`).

pub mod annualized_return;
pub mod error;
pub mod factory;
pub mod max_drawdown;
pub mod performance;
pub mod validation;
pub mod volatility;

pub use annualized_return::AnnualizedReturn;
pub use error::IndicatorError;
pub use factory::{create_indicator, create_indicators};
pub use max_drawdown::MaxDrawdown;
pub use performance::Performance;
pub use volatility::Volatility;

// Re-export IndicatorId from core_types
pub use core_types::IndicatorId;

use core_types::PricePoint;

/// The core trait that all indicators implement.
///
/// Indicators are stateless: `compute` takes `&self`, and the `Send + Sync`
/// bounds let one set of instances be shared by callers that evaluate several
/// securities in parallel.
pub trait Indicator: Send + Sync {
    /// Stable identifier, used both as the dispatch key and as the result column.
    fn name(&self) -> &str;

    /// Reduces a chronologically ordered slice to one value.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(value))` - the metric is defined for this slice.
    /// * `Ok(None)` - the slice does not hold enough data for the metric.
    /// * `Err(IndicatorError)` - the formula hit an arithmetic failure.
    fn compute(&self, slice: &[PricePoint]) -> Result<Option<f64>, IndicatorError>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, TimeZone};
    use chrono_tz::Tz;
    use core_types::PricePoint;

    /// One point per calendar day starting 2024-01-01 UTC.
    pub fn daily_points(closes: &[Option<f64>]) -> Vec<PricePoint> {
        let start = Tz::UTC.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, close)| PricePoint {
                date: start + Duration::days(i as i64),
                close: *close,
            })
            .collect()
    }

    pub fn prices(values: &[f64]) -> Vec<PricePoint> {
        let closes: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        daily_points(&closes)
    }

    pub fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }
}
