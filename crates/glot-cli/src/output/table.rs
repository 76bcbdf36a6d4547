//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};
use serde::Serialize;

/// One strategy a bound pattern uses.
#[derive(Debug, Serialize)]
pub struct StrategyRow {
    /// Nesting level: 0 for top-level parts, +1 inside each case or group.
    pub depth: usize,
    /// The construct the strategy is attached to (e.g., "parameter", "case").
    pub construct: &'static str,
    /// The text the strategy was resolved from.
    pub text: String,
    pub role: &'static str,
    pub strategy: &'static str,
}

/// Format strategy rows as a table, indenting nested constructs.
pub fn format_strategy_table(rows: &[StrategyRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Construct", "Text", "Role", "Strategy"]);

    for row in rows {
        table.add_row(vec![
            format!("{}{}", "  ".repeat(row.depth), row.construct),
            row.text.clone(),
            row.role.to_string(),
            row.strategy.to_string(),
        ]);
    }

    table
}
