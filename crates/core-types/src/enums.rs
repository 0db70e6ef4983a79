use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one of the built-in indicators.
///
/// The serialized form (`"performance"`, `"max_drawdown"`, ...) is also the
/// column name the indicator produces in a result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorId {
    Performance,
    Volatility,
    AnnualizedReturn,
    MaxDrawdown,
}

impl IndicatorId {
    /// Every built-in indicator, in the default reporting order.
    pub const ALL: [IndicatorId; 4] = [
        IndicatorId::Performance,
        IndicatorId::Volatility,
        IndicatorId::AnnualizedReturn,
        IndicatorId::MaxDrawdown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorId::Performance => "performance",
            IndicatorId::Volatility => "volatility",
            IndicatorId::AnnualizedReturn => "annualized_return",
            IndicatorId::MaxDrawdown => "max_drawdown",
        }
    }
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        IndicatorId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownIndicator(s.to_string()))
    }
}

/// The canonical trailing windows.
///
/// Declaration order is the canonical reporting order, so the derived `Ord`
/// keeps result tables sorted YTD, 3M, 6M, 1Y, 3Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WindowName {
    #[serde(rename = "YTD")]
    Ytd,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "3Y")]
    ThreeYears,
}

impl WindowName {
    pub const ALL: [WindowName; 5] = [
        WindowName::Ytd,
        WindowName::ThreeMonths,
        WindowName::SixMonths,
        WindowName::OneYear,
        WindowName::ThreeYears,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowName::Ytd => "YTD",
            WindowName::ThreeMonths => "3M",
            WindowName::SixMonths => "6M",
            WindowName::OneYear => "1Y",
            WindowName::ThreeYears => "3Y",
        }
    }

    /// The calendar offset in months for trailing windows, `None` for YTD.
    pub fn months_back(&self) -> Option<u32> {
        match self {
            WindowName::Ytd => None,
            WindowName::ThreeMonths => Some(3),
            WindowName::SixMonths => Some(6),
            WindowName::OneYear => Some(12),
            WindowName::ThreeYears => Some(36),
        }
    }
}

impl fmt::Display for WindowName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
