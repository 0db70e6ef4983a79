//! Console and file reporting of computed results.

use analytics::{ResultTable, Window};
use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, Table};
use std::fs;
use std::path::Path;

const NULL_CELL: &str = "n/a";

/// Formats a value as a percentage with two decimals, or `n/a` when null.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => NULL_CELL.to_string(),
    }
}

/// One row per window, one column per indicator, in the given order.
pub fn render_results(results: &ResultTable, indicators: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec!["Window".to_string()];
    header.extend(indicators.iter().map(|name| name.to_string()));
    table.set_header(header);

    for (window, _) in results.iter() {
        let mut row = vec![window.to_string()];
        row.extend(
            indicators
                .iter()
                .map(|name| format_value(results.get(window, name))),
        );
        table.add_row(row);
    }

    for index in 1..=indicators.len() {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

pub fn render_windows(windows: &[Window]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Window", "Start", "End"]);
    for window in windows {
        let start = window
            .start
            .map(|s| s.to_rfc3339())
            .unwrap_or_else(|| NULL_CELL.to_string());
        table.add_row(vec![window.name.to_string(), start, window.end.to_rfc3339()]);
    }
    table
}

/// Saves the results as pretty-printed JSON, creating parent directories as needed.
pub fn save_json(results: &ResultTable, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path, json).with_context(|| format!("Failed to write results to {}", path.display()))?;
    tracing::info!(path = %path.display(), "Saved results");
    Ok(())
}
