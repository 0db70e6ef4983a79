//! Reads a price history from CSV into a `RawPriceSeries`.
//!
//! This is a stand-in for the data-fetch step: it does no validation beyond
//! what is needed to hand the columns over. Timestamps stay textual so that
//! the aggregator decides how to interpret them.

use anyhow::{Context, bail};
use core_types::{RawPriceSeries, RawTimestamp};
use std::io;
use std::path::Path;

const DATE_COLUMN: &str = "date";
const CLOSE_COLUMN: &str = "close";

/// Close values treated as a missing observation.
const MISSING_MARKERS: [&str; 5] = ["", "nan", "null", "na", "n/a"];

pub fn load_price_csv(path: &Path) -> anyhow::Result<RawPriceSeries> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open price file {}", path.display()))?;
    read_price_csv(file).with_context(|| format!("Failed to read price file {}", path.display()))
}

/// Reads `Date` and `Close` columns (matched case-insensitively) from CSV data.
///
/// A missing column is reported as absent in the returned series, not as an error.
pub fn read_price_csv<R: io::Read>(reader: R) -> anyhow::Result<RawPriceSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let date_idx = find(DATE_COLUMN);
    let close_idx = find(CLOSE_COLUMN);

    let mut dates = Vec::new();
    let mut closes = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV row {}", row + 1))?;
        if let Some(idx) = date_idx {
            dates.push(RawTimestamp::Text(record.get(idx).unwrap_or_default().to_string()));
        }
        if let Some(idx) = close_idx {
            closes.push(parse_close(record.get(idx).unwrap_or_default(), row + 1)?);
        }
    }

    Ok(RawPriceSeries {
        dates: date_idx.map(|_| dates),
        closes: close_idx.map(|_| closes),
    })
}

fn parse_close(field: &str, row: usize) -> anyhow::Result<Option<f64>> {
    if MISSING_MARKERS.iter().any(|m| field.eq_ignore_ascii_case(m)) {
        return Ok(None);
    }
    match field.parse::<f64>() {
        Ok(value) => Ok(Some(value)),
        Err(e) => bail!("Close '{}' on row {} is not a number: {}", field, row, e),
    }
}
