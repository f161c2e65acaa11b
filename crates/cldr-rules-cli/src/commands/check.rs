//! Implementation of the `cldr-rules check` command.

use std::collections::BTreeSet;
use std::path::PathBuf;

use cldr_rules::{CompileCache, CompileError, RbnfRegistry};
use miette::Report;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::output::{print_json, RuleDiagnostic};
use crate::rules_file::{LoadError, LoadedRules};

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Rules files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat unresolved rule-set references as errors
    #[arg(long)]
    pub strict: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    errors: Vec<String>,
    unresolved: Vec<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut reports = Vec::new();
    let mut failed = false;

    for path in &args.files {
        let report = match LoadedRules::load(path) {
            Ok(loaded) => check_rules(&loaded, args.json),
            Err(err) => {
                if !args.json {
                    report_load_error(&err);
                }
                FileReport {
                    file: path.display().to_string(),
                    errors: vec![err.to_string()],
                    unresolved: Vec::new(),
                }
            }
        };

        failed |= !report.errors.is_empty() || (args.strict && !report.unresolved.is_empty());
        if !args.json {
            print_summary(&report);
        }
        reports.push(report);
    }

    if args.json {
        print_json(&reports)?;
    }

    Ok(if failed {
        exitcode::DATAERR
    } else {
        exitcode::OK
    })
}

/// Compile every rule in the file, collecting all errors rather than the first.
fn check_rules(loaded: &LoadedRules, quiet: bool) -> FileReport {
    let rules = &loaded.rules;
    let mut cache = CompileCache::new();
    let mut registry = RbnfRegistry::new();
    let mut failed = BTreeSet::new();
    let mut errors = Vec::new();
    let mut report = |origin: String, err: CompileError| {
        if !quiet {
            let diagnostic = RuleDiagnostic::from_compile_error(&origin, &err);
            eprintln!("{:?}", Report::new(diagnostic));
        }
        errors.push(format!("{origin}: {err}"));
    };

    for kind in rules.plurals.keys() {
        if let Err(err) = rules.compile_plurals(*kind, &mut cache) {
            report(format!("plurals.{kind}"), err);
        }
    }
    for (name, body) in &rules.rule_sets {
        match rules.compile_rule_set(name, body, &mut cache) {
            Ok(rule_set) => {
                registry.insert(rule_set);
            }
            Err(err) => {
                failed.insert(name.trim_start_matches('%'));
                report(format!("rule_sets.{name}"), err);
            }
        }
    }

    // References to rule sets that failed to compile are already reported.
    let unresolved = registry
        .unresolved_references()
        .into_iter()
        .filter(|(_, name)| !failed.contains(name.as_str()))
        .map(|(from, name)| format!("{from} -> %{name}"))
        .collect();

    FileReport {
        file: loaded.path.display().to_string(),
        errors,
        unresolved,
    }
}

fn report_load_error(err: &LoadError) {
    match RuleDiagnostic::from_load_error(err) {
        Some(diagnostic) => eprintln!("{:?}", Report::new(diagnostic)),
        None => eprintln!("{} {err}", "error:".red().bold()),
    }
}

fn print_summary(report: &FileReport) {
    for reference in &report.unresolved {
        eprintln!(
            "{} unresolved rule-set reference {reference}",
            "warning:".yellow().bold()
        );
    }
    if report.errors.is_empty() {
        println!("{} {}", "ok".green().bold(), report.file);
    } else {
        println!(
            "{} {} ({} error{})",
            "failed".red().bold(),
            report.file,
            report.errors.len(),
            if report.errors.len() == 1 { "" } else { "s" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(json: &str) -> LoadedRules {
        LoadedRules {
            path: PathBuf::from("rules.json"),
            rules: serde_json::from_str(json).unwrap(),
        }
    }

    #[test]
    fn failed_rule_set_is_not_also_unresolved() {
        let rules = loaded(
            r#"{
                "rule_sets": {
                    "%main": [["0", "=%broken=;"], ["10", "<%missing<0;"]],
                    "%broken": [["0", "<<<;"]]
                }
            }"#,
        );
        let report = check_rules(&rules, true);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("rule_sets.%broken"));
        assert_eq!(report.unresolved, vec!["main -> %missing".to_string()]);
    }

    #[test]
    fn clean_file_has_no_findings() {
        let rules = loaded(
            r#"{
                "plurals": { "cardinal": [["one", "i = 1 and v = 0"]] },
                "rule_sets": { "digits": [["0", "=#,##0=;"]] }
            }"#,
        );
        let report = check_rules(&rules, true);
        assert!(report.errors.is_empty());
        assert!(report.unresolved.is_empty());
    }
}
