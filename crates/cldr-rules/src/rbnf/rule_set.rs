//! Compiled RBNF rule sets and rule selection.

use std::collections::{BTreeMap, BTreeSet};

use bon::Builder;
use log::debug;

use super::ast::{BaseValue, RbnfRule};
use super::registry::RbnfRegistry;
use super::rule::{DEFAULT_RULE_SET, RuleContext, compile_rule};
use crate::cache::CompileCache;
use crate::error::{CompileError, EvalError};

/// Options shared by every rule of a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
pub struct RuleSetOptions {
    /// Rule set that a target-less `<<` in a fraction rule set falls back to.
    #[builder(default = DEFAULT_RULE_SET.to_string())]
    pub default_rule_set: String,
}

impl Default for RuleSetOptions {
    fn default() -> Self {
        RuleSetOptions::builder().build()
    }
}

/// A named, compiled collection of RBNF rules.
///
/// Rule-set references are kept by name and resolved against an
/// [`RbnfRegistry`] when formatting, so rule sets may call each other and
/// themselves.
///
/// # Example
///
/// ```
/// use cldr_rules::{RbnfRegistry, RbnfRuleSet};
///
/// let digits = RbnfRuleSet::compile(
///     "digits",
///     [("0", "zero;"), ("1", "one;"), ("2", "two;"), ("10", "<< tens[ and >>];")],
/// )
/// .unwrap();
///
/// let mut registry = RbnfRegistry::new();
/// registry.insert(digits);
/// assert_eq!(registry.format("digits", 21.0).unwrap(), "two tens and one");
/// assert_eq!(registry.format("digits", 20.0).unwrap(), "two tens");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RbnfRuleSet {
    name: String,
    /// Numeric rules, highest base value first.
    numeric: Vec<RbnfRule>,
    /// Rules keyed by a special marker.
    special: BTreeMap<BaseValue, RbnfRule>,
    depends_on: BTreeSet<String>,
}

impl RbnfRuleSet {
    /// Compile a rule set from `(key, body)` pairs.
    ///
    /// Keys are base values (`100`, `1,000`), base values with a radix
    /// (`100/20`) or special markers (`-x`, `x.x`, `0.x`, `x.0`, `Inf`, `NaN`).
    pub fn compile<I, K, B>(name: &str, rules: I) -> Result<RbnfRuleSet, CompileError>
    where
        I: IntoIterator<Item = (K, B)>,
        K: AsRef<str>,
        B: AsRef<str>,
    {
        RbnfRuleSet::compile_inner(name, rules, &RuleSetOptions::default(), None)
    }

    /// Compile with explicit options.
    pub fn compile_with<I, K, B>(
        name: &str,
        rules: I,
        options: &RuleSetOptions,
    ) -> Result<RbnfRuleSet, CompileError>
    where
        I: IntoIterator<Item = (K, B)>,
        K: AsRef<str>,
        B: AsRef<str>,
    {
        RbnfRuleSet::compile_inner(name, rules, options, None)
    }

    /// Compile with explicit options, reusing previously compiled rules.
    pub fn compile_cached<I, K, B>(
        name: &str,
        rules: I,
        options: &RuleSetOptions,
        cache: &mut CompileCache,
    ) -> Result<RbnfRuleSet, CompileError>
    where
        I: IntoIterator<Item = (K, B)>,
        K: AsRef<str>,
        B: AsRef<str>,
    {
        RbnfRuleSet::compile_inner(name, rules, options, Some(cache))
    }

    fn compile_inner<I, K, B>(
        name: &str,
        rules: I,
        options: &RuleSetOptions,
        mut cache: Option<&mut CompileCache>,
    ) -> Result<RbnfRuleSet, CompileError>
    where
        I: IntoIterator<Item = (K, B)>,
        K: AsRef<str>,
        B: AsRef<str>,
    {
        let name = name.trim_start_matches('%').to_string();
        let mut keyed = Vec::new();
        let mut seen = BTreeSet::new();
        for (key, body) in rules {
            let key = key.as_ref().to_string();
            let (base, radix) = parse_rule_key(&key).map_err(|source| CompileError::InRbnfRule {
                rule_set: name.clone(),
                key: key.clone(),
                source: Box::new(source),
            })?;
            if !seen.insert(base) {
                return Err(CompileError::DuplicateRule {
                    rule_set: name,
                    key,
                });
            }
            keyed.push((key, base, radix, body));
        }

        let fraction_rule_set =
            !keyed.is_empty() && keyed.iter().all(|(_, base, ..)| base.is_fraction_rule());

        let mut numeric = Vec::new();
        let mut special = BTreeMap::new();
        let mut depends_on = BTreeSet::new();
        for (key, base, radix, body) in keyed {
            let context = RuleContext::builder()
                .base(base)
                .radix(radix)
                .rule_set(name.as_str())
                .fraction_rule_set(fraction_rule_set)
                .default_rule_set(options.default_rule_set.as_str())
                .build();
            let compiled = match cache.as_deref_mut() {
                Some(cache) => cache.rbnf_rule(body.as_ref(), &context),
                None => compile_rule(body.as_ref(), &context),
            };
            let rule = compiled.map_err(|source| CompileError::InRbnfRule {
                rule_set: name.clone(),
                key,
                source: Box::new(source),
            })?;

            depends_on.extend(rule.depends_on());
            match base {
                BaseValue::Number(_) => numeric.push(rule),
                _ => {
                    special.insert(base, rule);
                }
            }
        }
        numeric.sort_by(|a, b| b.base.cmp(&a.base));

        debug!(
            "compiled rule set '{name}': {} numeric rules, {} special rules, depends on {:?}",
            numeric.len(),
            special.len(),
            depends_on
        );
        Ok(RbnfRuleSet {
            name,
            numeric,
            special,
            depends_on,
        })
    }

    /// The rule set's name, without `%` prefixes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of every rule set this one references, itself included if it
    /// recurses.
    pub fn depends_on(&self) -> &BTreeSet<String> {
        &self.depends_on
    }

    /// All rules: special rules first, then numeric rules from highest base.
    pub fn rules(&self) -> impl Iterator<Item = &RbnfRule> {
        self.special.values().chain(self.numeric.iter())
    }

    /// Whether the set has any fraction-aware rule (`x.x` or `x.0`).
    fn has_fraction_rules(&self) -> bool {
        self.special.contains_key(&BaseValue::Improper) || self.special.contains_key(&BaseValue::Master)
    }

    /// Select the rule that formats `n`.
    ///
    /// Special rules are tried first: `NaN`, then `x.0` for fractional values,
    /// `-x` for negatives, `Inf`, `x.x` for fractional values above 1 (or
    /// below 1 when there is no `0.x` rule) and `0.x` for values between 0 and
    /// 1. Otherwise the numeric rule with the largest base value not exceeding
    /// `n` applies.
    pub fn rule_for(&self, n: f64) -> Option<&RbnfRule> {
        if n.is_nan() {
            return self.special.get(&BaseValue::NaN);
        }

        let fractional = self.has_fraction_rules() && n.is_finite() && n != n.floor();
        let proper_range = n > 0.0 && n < 1.0;
        let special = |base: BaseValue| self.special.get(&base);

        let chosen = fractional
            .then(|| special(BaseValue::Master))
            .flatten()
            .or_else(|| (n < 0.0).then(|| special(BaseValue::Negative)).flatten())
            .or_else(|| (n == f64::INFINITY).then(|| special(BaseValue::Infinity)).flatten())
            .or_else(|| {
                let improper = fractional
                    && (n > 1.0 || (proper_range && !self.special.contains_key(&BaseValue::Proper)));
                improper.then(|| special(BaseValue::Improper)).flatten()
            })
            .or_else(|| proper_range.then(|| special(BaseValue::Proper)).flatten());
        if chosen.is_some() {
            return chosen;
        }

        self.numeric.iter().find(|rule| match rule.base {
            BaseValue::Number(base) => base as f64 <= n,
            _ => false,
        })
    }

    /// Format `n`, resolving rule-set references through `registry`.
    pub fn format(&self, n: f64, registry: &RbnfRegistry) -> Result<String, EvalError> {
        let mut out = String::new();
        let mut context = registry.eval_context();
        self.render(n, registry, &mut context, &mut out)?;
        Ok(out)
    }
}

/// Split a rule key into its base value and radix.
fn parse_rule_key(key: &str) -> Result<(BaseValue, u32), CompileError> {
    match key.split_once('/') {
        Some((base, radix)) => {
            let radix = radix
                .trim()
                .parse()
                .map_err(|_| CompileError::InvalidBaseValue {
                    key: key.to_string(),
                })?;
            Ok((base.parse()?, radix))
        }
        None => Ok((key.parse()?, 10)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_keys_accept_radix_and_grouping() {
        assert_eq!(parse_rule_key("100/20").unwrap(), (BaseValue::Number(100), 20));
        assert_eq!(parse_rule_key("1,000").unwrap(), (BaseValue::Number(1000), 10));
        assert_eq!(parse_rule_key("x.x").unwrap(), (BaseValue::Improper, 10));
        assert!(parse_rule_key("ten").is_err());
        assert!(parse_rule_key("100/x").is_err());
    }
}
