//! Implementation of the `cldr-rules spell` command.

use std::path::PathBuf;

use serde::Serialize;

use crate::output::{format_results_table, print_json, ResultRow};
use crate::rules_file::LoadedRules;

/// Arguments for the spell command.
#[derive(Debug, clap::Args)]
pub struct SpellArgs {
    /// Rules file (.json)
    pub file: PathBuf,

    /// Rule set to format with; defaults to the file's default rule set
    #[arg(long, env = "CLDR_RULE_SET")]
    pub rule_set: Option<String>,

    /// Numbers to format (e.g. 42, -3.5, inf)
    #[arg(required = true, allow_hyphen_values = true)]
    pub numbers: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one formatted number.
#[derive(Serialize)]
struct Spelling {
    number: String,
    text: Option<String>,
    error: Option<String>,
}

/// Run the spell command.
pub fn run_spell(args: SpellArgs) -> miette::Result<i32> {
    let loaded = LoadedRules::load(&args.file).map_err(|e| miette::miette!("{e}"))?;
    let registry = loaded
        .rules
        .registry()
        .map_err(|e| miette::miette!("{e}"))?;
    let rule_set = args
        .rule_set
        .unwrap_or_else(|| loaded.rules.default_rule_set.clone());

    let results: Vec<Spelling> = args
        .numbers
        .iter()
        .map(|number| {
            let result = number
                .parse::<f64>()
                .map_err(|_| format!("'{number}' is not a number"))
                .and_then(|n| registry.format(&rule_set, n).map_err(|e| e.to_string()));
            match result {
                Ok(text) => Spelling {
                    number: number.clone(),
                    text: Some(text),
                    error: None,
                },
                Err(error) => Spelling {
                    number: number.clone(),
                    text: None,
                    error: Some(error),
                },
            }
        })
        .collect();
    let failed = results.iter().any(|r| r.error.is_some());

    if args.json {
        print_json(&results)?;
    } else {
        let rows: Vec<ResultRow> = results
            .into_iter()
            .map(|r| ResultRow {
                input: r.number,
                output: r.text.or(r.error).unwrap_or_default(),
            })
            .collect();
        println!("{}", format_results_table(&rule_set, &rows));
    }

    Ok(if failed {
        exitcode::DATAERR
    } else {
        exitcode::OK
    })
}
