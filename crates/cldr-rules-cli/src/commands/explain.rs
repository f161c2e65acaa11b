//! Implementation of the `cldr-rules explain` command.

use cldr_rules::{compile_plural_condition, Operand};
use miette::Report;
use serde::Serialize;

use crate::output::{print_json, RuleDiagnostic};

/// Arguments for the explain command.
#[derive(Debug, clap::Args)]
pub struct ExplainArgs {
    /// Plural condition, e.g. "n % 10 = 1 and n % 100 != 11"
    pub condition: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for explain results.
#[derive(Serialize)]
struct Explanation {
    canonical: String,
    operands: Vec<Operand>,
}

/// Run the explain command.
pub fn run_explain(args: ExplainArgs) -> miette::Result<i32> {
    let condition = match compile_plural_condition(&args.condition) {
        Ok(condition) => condition,
        Err(err) => {
            if args.json {
                print_json(&serde_json::json!({ "error": err.to_string() }))?;
            } else {
                let diagnostic = RuleDiagnostic::from_compile_error("condition", &err);
                eprintln!("{:?}", Report::new(diagnostic));
            }
            return Ok(exitcode::DATAERR);
        }
    };

    let explanation = Explanation {
        canonical: condition.to_string(),
        operands: condition.operands().iter().collect(),
    };
    if args.json {
        print_json(&explanation)?;
    } else {
        println!("{}", explanation.canonical);
        println!("operands: {}", condition.operands());
    }
    Ok(exitcode::OK)
}
