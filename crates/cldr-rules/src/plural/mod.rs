//! CLDR plural rules.
//!
//! This module parses plural conditions into an AST and combines a locale's
//! ordered rules into a [`PluralRuleSet`] that classifies numbers.

pub mod ast;
mod parser;
mod rule_set;

pub use ast::{Condition, Expr, RangeItem, RangeList};
pub use parser::parse_condition;
pub use rule_set::{OTHER, PluralInput, PluralRule, PluralRuleSet, PluralRuleType};

use crate::error::CompileError;

/// Parse one plural condition string.
pub fn compile_plural_condition(text: &str) -> Result<Condition, CompileError> {
    parse_condition(text)
}

/// Compile a locale's ordered `(category, condition)` pairs.
pub fn compile_plural_rule_set<I, C, T>(rules: I) -> Result<PluralRuleSet, CompileError>
where
    I: IntoIterator<Item = (C, T)>,
    C: Into<String>,
    T: AsRef<str>,
{
    PluralRuleSet::compile(rules)
}
