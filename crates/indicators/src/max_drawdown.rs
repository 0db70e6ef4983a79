use crate::error::IndicatorError;
use crate::validation::{Field, MIN_OBSERVATIONS, has_enough_values, observed_prices};
use crate::Indicator;
use core_types::{IndicatorId, PricePoint};

/// Deepest fall from a running peak, as a non-positive fraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxDrawdown;

impl Indicator for MaxDrawdown {
    fn name(&self) -> &str {
        IndicatorId::MaxDrawdown.as_str()
    }

    fn compute(&self, slice: &[PricePoint]) -> Result<Option<f64>, IndicatorError> {
        if !has_enough_values(slice, &[Field::Close], MIN_OBSERVATIONS) {
            return Ok(None);
        }

        let mut peak = f64::NEG_INFINITY;
        let mut max_drawdown = 0.0_f64;
        for (_, price) in observed_prices(slice) {
            peak = peak.max(price);
            if peak <= 0.0 {
                return Err(IndicatorError::NonPositivePrice {
                    indicator: self.name().to_string(),
                    price: peak,
                });
            }
            max_drawdown = max_drawdown.min(price / peak - 1.0);
        }

        Ok(Some(max_drawdown))
    }
}
