use crate::error::IndicatorError;
use crate::validation::{Field, MIN_OBSERVATIONS, has_enough_values, observed_prices};
use crate::Indicator;
use core_types::{IndicatorId, PricePoint};

/// Trading sessions per year used to annualize daily dispersion.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Annualized volatility of day-over-day log returns.
///
/// Uses the sample standard deviation (n - 1 denominator). A single return
/// has no dispersion and yields `0.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Volatility;

impl Indicator for Volatility {
    fn name(&self) -> &str {
        IndicatorId::Volatility.as_str()
    }

    fn compute(&self, slice: &[PricePoint]) -> Result<Option<f64>, IndicatorError> {
        if !has_enough_values(slice, &[Field::Close], MIN_OBSERVATIONS) {
            return Ok(None);
        }
        let prices: Vec<f64> = observed_prices(slice).into_iter().map(|(_, p)| p).collect();

        if let Some(&price) = prices.iter().find(|p| **p <= 0.0) {
            return Err(IndicatorError::NonPositivePrice {
                indicator: self.name().to_string(),
                price,
            });
        }

        let returns: Vec<f64> = prices.windows(2).map(|w| w[1].ln() - w[0].ln()).collect();
        if returns.is_empty() {
            return Ok(None);
        }

        let std_dev = sample_std_dev(&returns);
        tracing::debug!(
            returns = returns.len(),
            std_dev,
            "Volatility: computed dispersion of log returns"
        );
        Ok(Some(std_dev * TRADING_DAYS_PER_YEAR.sqrt()))
    }
}

fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_close, daily_points, prices};

    #[test]
    fn flat_prices_have_zero_volatility() {
        let value = Volatility.compute(&prices(&[100.0; 30])).unwrap().unwrap();
        assert_close(value, 0.0);
    }

    #[test]
    fn annualizes_sample_deviation_of_log_returns() {
        let value = Volatility.compute(&prices(&[100.0, 110.0, 99.0])).unwrap().unwrap();

        let r1 = (110.0f64 / 100.0).ln();
        let r2 = (99.0f64 / 110.0).ln();
        let mean = (r1 + r2) / 2.0;
        let expected = (((r1 - mean).powi(2) + (r2 - mean).powi(2)) / 1.0).sqrt() * 252f64.sqrt();
        assert_close(value, expected);
    }

    #[test]
    fn missing_prices_are_dropped_before_differencing() {
        let with_gap = daily_points(&[Some(100.0), None, Some(110.0), Some(99.0)]);
        let without_gap = prices(&[100.0, 110.0, 99.0]);
        assert_eq!(
            Volatility.compute(&with_gap).unwrap(),
            Volatility.compute(&without_gap).unwrap()
        );
    }

    #[test]
    fn two_prices_give_zero() {
        assert_eq!(Volatility.compute(&prices(&[100.0, 120.0])), Ok(Some(0.0)));
    }

    #[test]
    fn non_positive_price_is_an_error() {
        let err = Volatility.compute(&prices(&[100.0, -1.0])).unwrap_err();
        assert!(matches!(err, IndicatorError::NonPositivePrice { price, .. } if price == -1.0));
    }
}
