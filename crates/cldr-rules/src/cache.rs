//! Compilation cache shared across rule sets.
//!
//! CLDR data repeats many rule texts across locales (`i = 1 and v = 0` is the
//! `one` rule of dozens of languages), so a loader that compiles many locales
//! can parse each distinct text once. The cache is an explicit value owned by
//! the caller; there is no process-wide state.

use std::collections::HashMap;

use log::trace;

use crate::error::CompileError;
use crate::plural::{Condition, parse_condition};
use crate::rbnf::{RbnfRule, RuleContext, compile_rbnf_rule};

/// Memoizes compiled plural conditions and RBNF rules by source text.
///
/// # Example
///
/// ```
/// use cldr_rules::{CompileCache, PluralRuleSet};
///
/// let mut cache = CompileCache::new();
/// let de = PluralRuleSet::compile_cached([("one", "i = 1 and v = 0")], &mut cache).unwrap();
/// let nl = PluralRuleSet::compile_cached([("one", "i = 1 and v = 0")], &mut cache).unwrap();
/// assert_eq!(de, nl);
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CompileCache {
    conditions: HashMap<String, Condition>,
    rules: HashMap<(String, RuleContext), RbnfRule>,
}

impl CompileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a plural condition, or return the earlier result for `text`.
    ///
    /// Failures are not cached.
    pub fn condition(&mut self, text: &str) -> Result<Condition, CompileError> {
        if let Some(condition) = self.conditions.get(text) {
            trace!("condition cache hit: '{text}'");
            return Ok(condition.clone());
        }
        let condition = parse_condition(text)?;
        self.conditions.insert(text.to_string(), condition.clone());
        Ok(condition)
    }

    /// Compile an RBNF rule body, or return the earlier result for the same
    /// body in an equal context.
    pub fn rbnf_rule(&mut self, body: &str, context: &RuleContext) -> Result<RbnfRule, CompileError> {
        let key = (body.to_string(), context.clone());
        if let Some(rule) = self.rules.get(&key) {
            trace!("rule cache hit: '{body}'");
            return Ok(rule.clone());
        }
        let rule = compile_rbnf_rule(body, context)?;
        self.rules.insert(key, rule.clone());
        Ok(rule)
    }

    /// Number of cached entries of both kinds.
    pub fn len(&self) -> usize {
        self.conditions.len() + self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.rules.is_empty()
    }

    pub fn clear(&mut self) {
        self.conditions.clear();
        self.rules.clear();
    }
}
