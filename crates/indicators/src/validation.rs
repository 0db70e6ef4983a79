//! Shared precondition checks for indicator inputs.

use chrono::DateTime;
use chrono_tz::Tz;
use core_types::PricePoint;

/// Every built-in indicator needs at least a first and a last observation.
pub const MIN_OBSERVATIONS: usize = 2;

/// An input field an indicator may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Close,
    Date,
}

/// Returns `true` when each of `fields` has at least `min_len` non-missing values.
///
/// Dates are never missing on a normalized series, so `Field::Date` counts rows.
pub fn has_enough_values(slice: &[PricePoint], fields: &[Field], min_len: usize) -> bool {
    fields.iter().all(|field| {
        let present = match field {
            Field::Close => slice.iter().filter(|p| p.price().is_some()).count(),
            Field::Date => slice.len(),
        };
        present >= min_len
    })
}

/// The observations that carry a price, in slice order, with their dates.
pub fn observed_prices(slice: &[PricePoint]) -> Vec<(DateTime<Tz>, f64)> {
    slice
        .iter()
        .filter_map(|p| p.price().map(|price| (p.date, price)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::daily_points;

    #[test]
    fn missing_prices_do_not_count() {
        let slice = daily_points(&[Some(1.0), None, Some(f64::NAN)]);
        assert!(!has_enough_values(&slice, &[Field::Close], MIN_OBSERVATIONS));
        assert!(has_enough_values(&slice, &[Field::Date], MIN_OBSERVATIONS));
        assert!(!has_enough_values(
            &slice,
            &[Field::Close, Field::Date],
            MIN_OBSERVATIONS
        ));
    }

    #[test]
    fn observed_prices_keep_their_dates() {
        let slice = daily_points(&[None, Some(10.0), None, Some(12.0)]);
        let observed = observed_prices(&slice);
        assert_eq!(observed.len(), 2);
        assert_eq!(observed[0], (slice[1].date, 10.0));
        assert_eq!(observed[1], (slice[3].date, 12.0));
    }
}
