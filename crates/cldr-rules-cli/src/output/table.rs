//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// One evaluated input: the number as typed and what it produced.
pub struct ResultRow {
    pub input: String,
    pub output: String,
}

/// Format evaluation results as a two-column table.
pub fn format_results_table(output_header: &str, rows: &[ResultRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Number", output_header]);

    for row in rows {
        table.add_row(vec![row.input.clone(), row.output.clone()]);
    }

    table
}
