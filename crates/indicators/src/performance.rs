use crate::error::IndicatorError;
use crate::validation::{Field, MIN_OBSERVATIONS, has_enough_values, observed_prices};
use crate::Indicator;
use core_types::{IndicatorId, PricePoint};

/// Total return over the slice: `last / first - 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Performance;

impl Indicator for Performance {
    fn name(&self) -> &str {
        IndicatorId::Performance.as_str()
    }

    fn compute(&self, slice: &[PricePoint]) -> Result<Option<f64>, IndicatorError> {
        if !has_enough_values(slice, &[Field::Close], MIN_OBSERVATIONS) {
            return Ok(None);
        }
        let prices = observed_prices(slice);
        let (Some(&(_, first)), Some(&(_, last))) = (prices.first(), prices.last()) else {
            return Ok(None);
        };

        if first == 0.0 {
            return Err(IndicatorError::DivisionByZero(self.name().to_string()));
        }
        Ok(Some(last / first - 1.0))
    }
}
