use chrono::{DateTime, Datelike, Months, NaiveTime, Utc};
use chrono_tz::Tz;
use core_types::{CoreError, PricePoint, PriceSeries, RawTimestamp, WindowName};

/// A named trailing range `[start, end]`, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub name: WindowName,
    /// `None` when the calendar offset falls outside the representable range;
    /// such a window selects nothing.
    pub start: Option<DateTime<Tz>>,
    pub end: DateTime<Tz>,
}

impl Window {
    /// The rows of `series` that fall inside this window.
    pub fn slice<'a>(&self, series: &'a PriceSeries) -> &'a [PricePoint] {
        match self.start {
            Some(start) => series.slice_between(start, self.end),
            None => &[],
        }
    }

    /// Returns `true` if `other` lies entirely within this window.
    pub fn contains(&self, other: &Window) -> bool {
        match (self.start, other.start) {
            (Some(start), Some(other_start)) => start <= other_start && other.end <= self.end,
            (_, None) => true,
            (None, Some(_)) => false,
        }
    }
}

/// Resolves the as-of instant in UTC.
///
/// Naive timestamps are read as UTC. Without an as-of, the current UTC day at
/// midnight is used.
pub fn resolve_as_of(as_of: Option<&RawTimestamp>) -> Result<DateTime<Utc>, CoreError> {
    match as_of {
        Some(timestamp) => timestamp.to_utc(),
        None => Ok(Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc()),
    }
}

/// Start of `name` for a window ending at `end`.
///
/// YTD keeps the time of day of `end`. Month and year offsets clamp an
/// overflowing day to the last day of the target month, so Mar 31 minus one
/// month is Feb 29 (or 28) and Feb 29 minus one year is Feb 28.
pub fn window_start(name: WindowName, end: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match name.months_back() {
        None => end.with_day(1).and_then(|d| d.with_month(1)),
        Some(months) => end.checked_sub_months(Months::new(months)),
    }
}

/// Derives the canonical windows for an explicit UTC end instant.
///
/// Arithmetic runs in UTC. The boundaries are then expressed in `timezone`.
pub fn derive_windows_at(end: DateTime<Utc>, timezone: Tz) -> Vec<Window> {
    WindowName::ALL
        .into_iter()
        .map(|name| {
            let start = window_start(name, end);
            tracing::debug!(window = %name, ?start, %end, "Derived window boundaries");
            Window {
                name,
                start: start.map(|s| s.with_timezone(&timezone)),
                end: end.with_timezone(&timezone),
            }
        })
        .collect()
}

/// Derives the canonical windows for `as_of` (see `resolve_as_of`).
pub fn derive_windows(as_of: Option<&RawTimestamp>, timezone: Tz) -> Result<Vec<Window>, CoreError> {
    let end = resolve_as_of(as_of)?;
    Ok(derive_windows_at(end, timezone))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn start_of(name: WindowName, end: DateTime<Utc>) -> DateTime<Utc> {
        window_start(name, end).unwrap()
    }

    #[test]
    fn ytd_keeps_time_of_day() {
        let end = utc(2024, 6, 15, 13, 45);
        assert_eq!(start_of(WindowName::Ytd, end), utc(2024, 1, 1, 13, 45));
    }

    #[test]
    fn ytd_from_the_last_day_of_a_long_month() {
        let end = utc(2024, 12, 31, 0, 0);
        assert_eq!(start_of(WindowName::Ytd, end), utc(2024, 1, 1, 0, 0));
    }

    #[test]
    fn month_offsets_clamp_to_last_valid_day() {
        assert_eq!(
            start_of(WindowName::ThreeMonths, utc(2024, 5, 31, 0, 0)),
            utc(2024, 2, 29, 0, 0)
        );
        assert_eq!(
            start_of(WindowName::ThreeMonths, utc(2023, 5, 31, 0, 0)),
            utc(2023, 2, 28, 0, 0)
        );
        assert_eq!(
            start_of(WindowName::SixMonths, utc(2024, 8, 31, 0, 0)),
            utc(2024, 2, 29, 0, 0)
        );
    }

    #[test]
    fn year_offsets_clamp_leap_day() {
        let leap_day = utc(2024, 2, 29, 9, 0);
        assert_eq!(start_of(WindowName::OneYear, leap_day), utc(2023, 2, 28, 9, 0));
        assert_eq!(start_of(WindowName::ThreeYears, leap_day), utc(2021, 2, 28, 9, 0));
    }

    #[test]
    fn naive_as_of_is_read_as_utc() {
        let naive = RawTimestamp::Text("2024-04-02 10:00:00".to_string());
        let aware = RawTimestamp::Text("2024-04-02T12:00:00+02:00".to_string());
        assert_eq!(resolve_as_of(Some(&naive)).unwrap(), utc(2024, 4, 2, 10, 0));
        assert_eq!(resolve_as_of(Some(&aware)).unwrap(), utc(2024, 4, 2, 10, 0));
    }

    #[test]
    fn missing_as_of_is_midnight_today() {
        let end = resolve_as_of(None).unwrap();
        assert_eq!(end.time(), NaiveTime::MIN);
        assert_eq!(end.date_naive(), Utc::now().date_naive());
    }

    #[test]
    fn boundaries_are_expressed_in_the_working_timezone() {
        let paris: Tz = "Europe/Paris".parse().unwrap();
        let windows = derive_windows_at(utc(2024, 6, 15, 0, 0), paris);
        assert_eq!(windows.len(), WindowName::ALL.len());

        let ytd = windows[0];
        assert_eq!(ytd.name, WindowName::Ytd);
        assert_eq!(ytd.start.unwrap(), utc(2024, 1, 1, 0, 0));
        assert_eq!(ytd.start.unwrap().timezone(), paris);
        assert_eq!(ytd.end.to_rfc3339(), "2024-06-15T02:00:00+02:00");
    }

    #[test]
    fn unrepresentable_start_selects_nothing() {
        let window = Window {
            name: WindowName::ThreeYears,
            start: None,
            end: Tz::UTC.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        };
        let series = PriceSeries::new(
            vec![PricePoint {
                date: Tz::UTC.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                close: Some(1.0),
            }],
            Tz::UTC,
        );
        assert!(window.slice(&series).is_empty());
    }
}
