//! Error types for rule compilation and evaluation.

use strsim::levenshtein;
use thiserror::Error;

use crate::plural::PluralRuleType;

/// An error raised while compiling plural or RBNF rule text.
///
/// Every compile error is raised synchronously; a rule set either compiles in
/// full or fails with the first offending rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Malformed plural condition grammar.
    #[error("plural rule syntax error at column {column} in '{rule}': {message} (near '{offending}')")]
    PluralRuleSyntax {
        rule: String,
        offending: String,
        column: usize,
        message: String,
    },

    /// Malformed RBNF rule body.
    #[error("RBNF rule syntax error in '{rule}': {message} (near '{offending}')")]
    RbnfRuleSyntax {
        rule: String,
        offending: String,
        message: String,
    },

    /// An RBNF rule key that is neither a number nor a known marker.
    #[error("invalid RBNF base value '{key}'")]
    InvalidBaseValue { key: String },

    /// An RBNF radix below 2.
    #[error("invalid RBNF radix {radix} for rule '{key}'")]
    InvalidRadix { key: String, radix: u32 },

    /// Two rules in one rule set share a base value.
    #[error("duplicate rule '{key}' in rule set '{rule_set}'")]
    DuplicateRule { rule_set: String, key: String },

    /// A plural rule failed to compile.
    #[error("invalid plural rule '{category}': {source}")]
    InPluralRule {
        category: String,
        #[source]
        source: Box<CompileError>,
    },

    /// An RBNF rule failed to compile.
    #[error("invalid rule '{key}' in rule set '{rule_set}': {source}")]
    InRbnfRule {
        rule_set: String,
        key: String,
        #[source]
        source: Box<CompileError>,
    },
}

impl CompileError {
    /// Returns the innermost error, unwrapping rule and rule-set context.
    pub fn root(&self) -> &CompileError {
        match self {
            CompileError::InPluralRule { source, .. } | CompileError::InRbnfRule { source, .. } => {
                source.root()
            }
            other => other,
        }
    }
}

/// An error raised while evaluating a compiled rule set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Text passed to operand derivation is not a decimal number.
    #[error("invalid numeric input '{input}'")]
    InvalidOperandInput { input: String },

    /// An RBNF substitution names a rule set missing from the registry.
    #[error("unknown rule set '%{name}' referenced from '{from}'{}", format_suggestions(suggestions))]
    UnknownRuleSetReference {
        name: String,
        from: String,
        suggestions: Vec<String>,
    },

    /// No rule in the rule set applies to the value.
    #[error("no rule in rule set '{rule_set}' applies to {value}")]
    NoApplicableRule { rule_set: String, value: String },

    /// A plural selector ran without plural rules of its kind registered.
    #[error("no {kind} plural rules registered for plural selector in '{rule_set}'")]
    MissingPluralRules {
        kind: PluralRuleType,
        rule_set: String,
    },

    /// Rule-set recursion went deeper than the registry allows.
    #[error("maximum rule-set depth exceeded: {}", chain.join(" -> "))]
    MaxDepthExceeded { chain: Vec<String> },
}

/// Compute typo suggestions for `key` among `available`, closest first.
///
/// Keys of three characters or fewer tolerate one edit, longer keys two. At
/// most three suggestions are returned.
pub fn compute_suggestions(key: &str, available: &[String]) -> Vec<String> {
    let max_distance = if key.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .iter()
        .filter_map(|candidate| {
            let dist = levenshtein(key, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, candidate.clone()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}
