//! # Trailing-Window Analytics
//!
//! This crate turns a raw price series into a table of indicator values over
//! the canonical trailing windows (YTD, 3M, 6M, 1Y, 3Y).
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate. It never fetches, caches or
//!   persists data. It depends only on `core-types` and `indicators`.
//! - **Total Output:** The `ResultTable` always holds every window and every
//!   configured indicator. Anything that cannot be computed is `None`.
//! - **Explicit Timezone:** The working timezone is given to the aggregator at
//!   construction. Window arithmetic itself always runs in UTC.
//!
//! ## Public API
//!
//! - `IndicatorAggregator`: Slices a series per window and runs indicators.
//! - `derive_windows` / `derive_windows_at`: The window boundary calculation.
//! - `normalize_series`: Ingestion of a raw series into a `PriceSeries`.
//! - `ResultTable`: The window → indicator → value output.
//! - `AnalyticsError`: The errors that are returned rather than recovered.

pub mod engine;
pub mod error;
pub mod ingest;
pub mod report;
pub mod windows;

pub use engine::{IndicatorAggregator, is_sufficient};
pub use error::AnalyticsError;
pub use ingest::normalize_series;
pub use report::ResultTable;
pub use windows::{Window, derive_windows, derive_windows_at, resolve_as_of};
