//! Rule-based number formatting (RBNF).
//!
//! Rule bodies are tokenized, resolved against their rule's base value into
//! [`RbnfRule`]s and grouped into named [`RbnfRuleSet`]s. Rule sets reference
//! each other by name; an [`RbnfRegistry`] resolves those references when a
//! number is formatted.

mod ast;
mod context;
mod evaluator;
mod parser;
mod registry;
mod renderer;
mod rule;
mod rule_set;

pub use ast::{BaseValue, Marker, RbnfNode, RbnfRule, SubstitutionOp, Target};
pub use context::DEFAULT_MAX_DEPTH;
pub use registry::RbnfRegistry;
pub use renderer::{NumberRenderer, PlainNumberRenderer};
pub use rule::{DEFAULT_RULE_SET, RuleContext};
pub use rule_set::{RbnfRuleSet, RuleSetOptions};

use crate::error::CompileError;

/// Compile one rule body in the context of its base value and rule set.
pub fn compile_rbnf_rule(body: &str, context: &RuleContext) -> Result<RbnfRule, CompileError> {
    rule::compile_rule(body, context)
}

/// Compile a named rule set from `(key, body)` pairs.
pub fn compile_rbnf_rule_set<I, K, B>(name: &str, rules: I) -> Result<RbnfRuleSet, CompileError>
where
    I: IntoIterator<Item = (K, B)>,
    K: AsRef<str>,
    B: AsRef<str>,
{
    RbnfRuleSet::compile(name, rules)
}
