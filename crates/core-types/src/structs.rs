use crate::error::CoreError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Naive layouts accepted for textual timestamps, tried in order after RFC 3339.
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Aware layouts with a numeric offset but no `T` separator.
const AWARE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// A timestamp exactly as delivered by an upstream data source.
///
/// Sources disagree on whether they send timezone information, and some only
/// send text. Ingestion resolves every variant to a UTC instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawTimestamp {
    Aware(DateTime<FixedOffset>),
    /// No timezone attached; interpreted as UTC.
    Naive(NaiveDateTime),
    Text(String),
}

impl RawTimestamp {
    /// Resolves the timestamp to a UTC instant.
    ///
    /// Naive values are localized to UTC and aware values are converted, so
    /// resolving an already-UTC timestamp is a no-op.
    pub fn to_utc(&self) -> Result<DateTime<Utc>, CoreError> {
        match self {
            RawTimestamp::Aware(aware) => Ok(aware.with_timezone(&Utc)),
            RawTimestamp::Naive(naive) => Ok(naive.and_utc()),
            RawTimestamp::Text(text) => parse_timestamp(text)?.to_utc(),
        }
    }
}

impl From<DateTime<Utc>> for RawTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        RawTimestamp::Aware(value.fixed_offset())
    }
}

impl From<NaiveDateTime> for RawTimestamp {
    fn from(value: NaiveDateTime) -> Self {
        RawTimestamp::Naive(value)
    }
}

impl From<NaiveDate> for RawTimestamp {
    fn from(value: NaiveDate) -> Self {
        RawTimestamp::Naive(value.and_time(NaiveTime::MIN))
    }
}

/// Parses a textual timestamp into a typed `RawTimestamp`.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.fff][±HH:MM]`, `YYYY-MM-DDTHH:MM:SS`
/// and plain `YYYY-MM-DD` (midnight). The result is never `RawTimestamp::Text`.
pub fn parse_timestamp(input: &str) -> Result<RawTimestamp, CoreError> {
    let trimmed = input.trim();

    if let Ok(aware) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(RawTimestamp::Aware(aware));
    }
    for format in AWARE_DATETIME_FORMATS {
        if let Ok(aware) = DateTime::parse_from_str(trimmed, format) {
            return Ok(RawTimestamp::Aware(aware));
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(RawTimestamp::Naive(naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.into());
    }

    Err(CoreError::InvalidTimestamp(input.to_string()))
}

/// A price series as handed over by the data-fetch step, before ingestion.
///
/// The layout is columnar: either column may be missing altogether, which the
/// aggregator treats as "no usable data" rather than as a failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPriceSeries {
    pub dates: Option<Vec<RawTimestamp>>,
    pub closes: Option<Vec<Option<f64>>>,
}

impl RawPriceSeries {
    pub fn new(dates: Vec<RawTimestamp>, closes: Vec<Option<f64>>) -> Self {
        Self {
            dates: Some(dates),
            closes: Some(closes),
        }
    }

    /// Builds a series from `(timestamp, close)` rows.
    pub fn from_rows<I, T>(rows: I) -> Self
    where
        I: IntoIterator<Item = (T, Option<f64>)>,
        T: Into<RawTimestamp>,
    {
        let (dates, closes): (Vec<RawTimestamp>, Vec<Option<f64>>) = rows
            .into_iter()
            .map(|(date, close)| (date.into(), close))
            .unzip();
        Self::new(dates, closes)
    }

    pub fn has_required_columns(&self) -> bool {
        self.dates.is_some() && self.closes.is_some()
    }

    /// Number of rows, taken from the timestamp column.
    pub fn len(&self) -> usize {
        self.dates.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&PriceSeries> for RawPriceSeries {
    fn from(series: &PriceSeries) -> Self {
        let (dates, closes) = series
            .points()
            .iter()
            .map(|p| (RawTimestamp::Aware(p.date.fixed_offset()), p.close))
            .unzip();
        Self::new(dates, closes)
    }
}

/// A single observation of a normalized series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: DateTime<Tz>,
    /// `None` for a missing observation.
    pub close: Option<f64>,
}

impl PricePoint {
    /// The observed price, treating a NaN close as missing.
    pub fn price(&self) -> Option<f64> {
        self.close.filter(|c| !c.is_nan())
    }
}

/// A normalized price series: timezone-aware and sorted ascending by date.
///
/// Duplicate dates are kept as delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
    timezone: Tz,
}

impl PriceSeries {
    /// Creates a series from points already expressed in `timezone`.
    ///
    /// Points are stably sorted by date, so callers need not pre-sort.
    pub fn new(mut points: Vec<PricePoint>, timezone: Tz) -> Self {
        points.sort_by_key(|p| p.date);
        Self { points, timezone }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The latest observation date, if any.
    pub fn last_date(&self) -> Option<DateTime<Tz>> {
        self.points.last().map(|p| p.date)
    }

    /// Returns the rows with `start <= date <= end`.
    ///
    /// An inverted range yields an empty slice.
    pub fn slice_between(&self, start: DateTime<Tz>, end: DateTime<Tz>) -> &[PricePoint] {
        let lo = self.points.partition_point(|p| p.date < start);
        let hi = self.points.partition_point(|p| p.date <= end);
        if lo >= hi { &[] } else { &self.points[lo..hi] }
    }
}
