use crate::error::IndicatorError;
use crate::validation::{Field, MIN_OBSERVATIONS, has_enough_values, observed_prices};
use crate::Indicator;
use core_types::{IndicatorId, PricePoint};

/// Average calendar-year length, leap years included.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Compound annual growth rate between the first and last observed prices.
///
/// `(last / first) ^ (365.25 / elapsed_days) - 1`, where `elapsed_days` counts
/// whole days between the dates of those two observations.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnualizedReturn;

impl Indicator for AnnualizedReturn {
    fn name(&self) -> &str {
        IndicatorId::AnnualizedReturn.as_str()
    }

    fn compute(&self, slice: &[PricePoint]) -> Result<Option<f64>, IndicatorError> {
        if !has_enough_values(slice, &[Field::Close, Field::Date], MIN_OBSERVATIONS) {
            return Ok(None);
        }
        let prices = observed_prices(slice);
        let (Some(&(first_date, first)), Some(&(last_date, last))) = (prices.first(), prices.last())
        else {
            return Ok(None);
        };

        let elapsed_days = (last_date - first_date).num_days();
        if elapsed_days <= 0 {
            return Ok(None);
        }
        if first == 0.0 {
            return Err(IndicatorError::DivisionByZero(self.name().to_string()));
        }

        let total_return = last / first;
        Ok(Some(total_return.powf(DAYS_PER_YEAR / elapsed_days as f64) - 1.0))
    }
}
