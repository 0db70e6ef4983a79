use crate::error::AnalyticsError;
use chrono_tz::Tz;
use core_types::{PricePoint, PriceSeries, RawPriceSeries};

/// Normalizes a raw series into a working copy expressed in `timezone`.
///
/// Returns `Ok(None)` when there is nothing to compute on: the series is
/// absent, has no rows, or lacks the timestamp or close column. Every
/// timestamp is resolved to UTC first (naive values are localized, aware
/// values converted) and then converted to `timezone`; rows are sorted by
/// instant. The caller's series is never modified.
///
/// An unreadable timestamp or misaligned columns are caller errors and are
/// returned as `Err`.
pub fn normalize_series(
    raw: Option<&RawPriceSeries>,
    timezone: Tz,
) -> Result<Option<PriceSeries>, AnalyticsError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let (Some(dates), Some(closes)) = (raw.dates.as_ref(), raw.closes.as_ref()) else {
        return Ok(None);
    };
    if dates.len() != closes.len() {
        return Err(AnalyticsError::ColumnLengthMismatch {
            dates: dates.len(),
            closes: closes.len(),
        });
    }
    if dates.is_empty() {
        return Ok(None);
    }

    let points = dates
        .iter()
        .zip(closes)
        .enumerate()
        .map(|(row, (date, close))| {
            let utc = date
                .to_utc()
                .map_err(|source| AnalyticsError::InvalidTimestamp { row, source })?;
            Ok(PricePoint {
                date: utc.with_timezone(&timezone),
                close: *close,
            })
        })
        .collect::<Result<Vec<_>, AnalyticsError>>()?;

    Ok(Some(PriceSeries::new(points, timezone)))
}
