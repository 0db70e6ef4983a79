use crate::error::AnalyticsError;
use crate::ingest::normalize_series;
use crate::report::ResultTable;
use crate::windows::{Window, derive_windows_at};
use chrono::Utc;
use chrono_tz::Tz;
use core_types::{PricePoint, RawPriceSeries, RawTimestamp};
use indicators::Indicator;

/// Minimum rows, and minimum rows with a price, before any indicator runs.
const MIN_SLICE_ROWS: usize = 2;

/// Returns `true` if a slice holds enough data for indicators to run.
///
/// It needs at least two rows overall and at least two with a price.
pub fn is_sufficient(slice: &[PricePoint]) -> bool {
    slice.len() >= MIN_SLICE_ROWS
        && slice.iter().filter(|p| p.price().is_some()).count() >= MIN_SLICE_ROWS
}

/// Computes every configured indicator over every canonical window.
///
/// The aggregator knows indicators only through `Indicator::name` and
/// `Indicator::compute`. It holds no mutable state, so one instance can be
/// shared across threads evaluating different securities.
pub struct IndicatorAggregator {
    indicators: Vec<Box<dyn Indicator>>,
    timezone: Tz,
}

impl IndicatorAggregator {
    /// Creates an aggregator whose series and window boundaries are expressed in `timezone`.
    ///
    /// Indicator names must be unique. The configuration layer enforces this.
    pub fn new(indicators: Vec<Box<dyn Indicator>>, timezone: Tz) -> Self {
        Self {
            indicators,
            timezone,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn indicator_names(&self) -> Vec<&str> {
        self.indicators.iter().map(|i| i.name()).collect()
    }

    /// The main entry point: computes the full result table for one series.
    ///
    /// # Arguments
    ///
    /// * `series` - The raw price series, or `None` if the fetch step produced nothing.
    /// * `as_of` - The window end. Defaults to the latest timestamp in the series.
    ///
    /// # Returns
    ///
    /// A total `ResultTable`. Missing data and indicator failures become
    /// `None` cells. Only an input that cannot be read as a series at all
    /// (an unreadable timestamp, misaligned columns) returns an `AnalyticsError`.
    #[tracing::instrument(name = "compute_all", skip_all, fields(timezone = %self.timezone))]
    pub fn compute_all(
        &self,
        series: Option<&RawPriceSeries>,
        as_of: Option<&RawTimestamp>,
    ) -> Result<ResultTable, AnalyticsError> {
        let names = self.indicator_names();
        let mut table = ResultTable::new(&names);

        let Some(series) = normalize_series(series, self.timezone)? else {
            tracing::warn!("Price series is empty or missing required columns; every value will be null.");
            return Ok(table);
        };

        let end = match as_of {
            Some(timestamp) => timestamp.to_utc()?,
            None => match series.last_date() {
                Some(last) => last.with_timezone(&Utc),
                None => return Ok(table),
            },
        };

        for window in derive_windows_at(end, self.timezone) {
            let slice = window.slice(&series);
            if !is_sufficient(slice) {
                tracing::debug!(
                    window = %window.name,
                    rows = slice.len(),
                    "Insufficient data in window; leaving it null."
                );
                continue;
            }
            self.compute_window(&window, slice, &mut table);
        }

        tracing::info!(
            rows = series.len(),
            %end,
            computed = table.computed_cells(),
            "Computed indicators for all windows."
        );
        Ok(table)
    }

    /// Runs every indicator on one sufficient slice and records the results.
    fn compute_window(&self, window: &Window, slice: &[PricePoint], table: &mut ResultTable) {
        for indicator in &self.indicators {
            let value = match indicator.compute(slice) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(
                        window = %window.name,
                        indicator = indicator.name(),
                        error = %e,
                        "Indicator failed; recording null."
                    );
                    None
                }
            };
            tracing::debug!(window = %window.name, indicator = indicator.name(), ?value, "Indicator value");
            table.set(window.name, indicator.name(), value);
        }
    }
}
