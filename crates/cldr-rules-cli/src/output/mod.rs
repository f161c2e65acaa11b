//! Terminal and JSON output helpers.

pub mod diagnostic;
pub mod table;

pub use diagnostic::RuleDiagnostic;
pub use table::{format_results_table, ResultRow};

use serde::Serialize;

/// Pretty-print `value` as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> miette::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| miette::miette!("JSON serialization failed: {e}"))?;
    println!("{json}");
    Ok(())
}
