use core_types::WindowName;
use serde::Serialize;
use std::collections::BTreeMap;

/// Indicator values for one window, keyed by indicator name.
pub type WindowValues = BTreeMap<String, Option<f64>>;

/// The output of the aggregator: window name → indicator name → value.
///
/// The table is total. Every canonical window is present and each one holds
/// every configured indicator. A value that could not be computed is `None`
/// (serialized as `null`), never a missing key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultTable {
    windows: BTreeMap<WindowName, WindowValues>,
}

impl ResultTable {
    /// Creates a table with every window and every indicator set to `None`.
    pub fn new<S: AsRef<str>>(indicator_names: &[S]) -> Self {
        let row: WindowValues = indicator_names
            .iter()
            .map(|name| (name.as_ref().to_string(), None))
            .collect();
        let windows = WindowName::ALL
            .into_iter()
            .map(|window| (window, row.clone()))
            .collect();
        Self { windows }
    }

    /// Records a value. Non-finite values are stored as `None`.
    pub fn set(&mut self, window: WindowName, indicator: &str, value: Option<f64>) {
        let value = value.filter(|v| v.is_finite());
        self.windows
            .entry(window)
            .or_default()
            .insert(indicator.to_string(), value);
    }

    /// The value of one cell. `None` both for a null cell and an unknown name.
    pub fn get(&self, window: WindowName, indicator: &str) -> Option<f64> {
        self.windows
            .get(&window)
            .and_then(|values| values.get(indicator))
            .copied()
            .flatten()
    }

    pub fn window(&self, window: WindowName) -> Option<&WindowValues> {
        self.windows.get(&window)
    }

    /// Windows in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (WindowName, &WindowValues)> {
        self.windows.iter().map(|(name, values)| (*name, values))
    }

    /// Number of cells holding a value.
    pub fn computed_cells(&self) -> usize {
        self.windows
            .values()
            .flat_map(|values| values.values())
            .filter(|v| v.is_some())
            .count()
    }

    /// Returns `true` when every window holds exactly `indicator_names`.
    pub fn is_total<S: AsRef<str>>(&self, indicator_names: &[S]) -> bool {
        WindowName::ALL.iter().all(|window| {
            self.windows.get(window).is_some_and(|values| {
                values.len() == indicator_names.len()
                    && indicator_names
                        .iter()
                        .all(|name| values.contains_key(name.as_ref()))
            })
        }) && self.windows.len() == WindowName::ALL.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_is_total_and_null() {
        let table = ResultTable::new(&["performance", "volatility"]);
        assert!(table.is_total(&["performance", "volatility"]));
        assert!(!table.is_total(&["performance"]));
        assert_eq!(table.computed_cells(), 0);
        assert_eq!(table.get(WindowName::OneYear, "performance"), None);
    }

    #[test]
    fn non_finite_values_become_null() {
        let mut table = ResultTable::new(&["performance"]);
        table.set(WindowName::Ytd, "performance", Some(f64::NAN));
        table.set(WindowName::ThreeMonths, "performance", Some(f64::INFINITY));
        table.set(WindowName::SixMonths, "performance", Some(0.25));

        assert_eq!(table.get(WindowName::Ytd, "performance"), None);
        assert_eq!(table.get(WindowName::ThreeMonths, "performance"), None);
        assert_eq!(table.get(WindowName::SixMonths, "performance"), Some(0.25));
        assert_eq!(table.computed_cells(), 1);
    }

    #[test]
    fn serializes_nulls_explicitly() {
        let mut table = ResultTable::new(&["max_drawdown"]);
        table.set(WindowName::Ytd, "max_drawdown", Some(-0.5));

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["YTD"]["max_drawdown"], serde_json::json!(-0.5));
        assert!(json["3Y"]["max_drawdown"].is_null());
        assert!(json["3Y"].as_object().unwrap().contains_key("max_drawdown"));
        assert_eq!(json.as_object().unwrap().len(), 5);
    }
}
