//! Implementation of the `cldr-rules plural` command.

use std::path::PathBuf;

use cldr_rules::plural::PluralRuleType;
use cldr_rules::{CompileCache, PluralOperands};
use clap::ValueEnum;
use serde::Serialize;

use crate::output::{format_results_table, print_json, ResultRow};
use crate::rules_file::LoadedRules;

/// Arguments for the plural command.
#[derive(Debug, clap::Args)]
pub struct PluralArgs {
    /// Rules file (.json)
    pub file: PathBuf,

    /// Which plural rules to apply
    #[arg(long = "type", value_enum, default_value_t = RuleType::Cardinal)]
    pub kind: RuleType,

    /// Numbers to classify, as decimal text (e.g. 1, 1.50, 1.2c6)
    #[arg(required = true, allow_hyphen_values = true)]
    pub numbers: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Plural rule type as a command-line value.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RuleType {
    Cardinal,
    Ordinal,
}

impl From<RuleType> for PluralRuleType {
    fn from(kind: RuleType) -> Self {
        match kind {
            RuleType::Cardinal => PluralRuleType::Cardinal,
            RuleType::Ordinal => PluralRuleType::Ordinal,
        }
    }
}

/// JSON output for one classified number.
#[derive(Serialize)]
struct Classification {
    number: String,
    category: Option<String>,
    error: Option<String>,
}

/// Run the plural command.
pub fn run_plural(args: PluralArgs) -> miette::Result<i32> {
    let loaded = LoadedRules::load(&args.file).map_err(|e| miette::miette!("{e}"))?;
    let kind = PluralRuleType::from(args.kind);
    let rules = loaded
        .rules
        .compile_plurals(kind, &mut CompileCache::new())
        .map_err(|e| miette::miette!("{e}"))?;

    let results: Vec<Classification> = args
        .numbers
        .iter()
        .map(|number| match PluralOperands::parse(number) {
            Ok(operands) => Classification {
                number: number.clone(),
                category: Some(rules.select_operands(&operands).to_string()),
                error: None,
            },
            Err(err) => Classification {
                number: number.clone(),
                category: None,
                error: Some(err.to_string()),
            },
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
                output: r.category.or(r.error).unwrap_or_default(),
            })
            .collect();
        println!("{}", format_results_table(&format!("{kind} category"), &rows));
    }

    Ok(if failed {
        exitcode::DATAERR
    } else {
        exitcode::OK
    })
}
