//! Rule-set registry for resolving rule-set references by name.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Debug, Formatter, Result as FmtResult};

use log::debug;

use super::context::{DEFAULT_MAX_DEPTH, EvalContext};
use super::renderer::{NumberRenderer, PlainNumberRenderer};
use super::rule_set::RbnfRuleSet;
use crate::error::{EvalError, compute_suggestions};
use crate::plural::{PluralRuleSet, PluralRuleType};

/// A registry of compiled rule sets for one locale.
///
/// Substitutions name other rule sets; the registry resolves those names when
/// a number is formatted. It also carries the plural rules used by
/// `$(cardinal,…)$` and `$(ordinal,…)$` selectors and the renderer used for
/// decimal-pattern substitutions.
///
/// # Example
///
/// ```
/// use cldr_rules::{PluralRuleSet, RbnfRegistry, RbnfRuleSet};
/// use cldr_rules::plural::PluralRuleType;
///
/// let ordinal = PluralRuleSet::compile([
///     ("one", "n % 10 = 1 and n % 100 != 11"),
///     ("two", "n % 10 = 2 and n % 100 != 12"),
///     ("few", "n % 10 = 3 and n % 100 != 13"),
/// ])
/// .unwrap();
/// let digits = RbnfRuleSet::compile(
///     "%digits-ordinal",
///     [("0", "=#,##0=$(ordinal,one{st}two{nd}few{rd}other{th})$;")],
/// )
/// .unwrap();
///
/// let mut registry = RbnfRegistry::new().with_plural_rules(PluralRuleType::Ordinal, ordinal);
/// registry.insert(digits);
/// assert_eq!(registry.format("digits-ordinal", 1022.0).unwrap(), "1,022nd");
/// assert_eq!(registry.format("digits-ordinal", 111.0).unwrap(), "111th");
/// ```
pub struct RbnfRegistry {
    rule_sets: BTreeMap<String, RbnfRuleSet>,
    cardinal: Option<PluralRuleSet>,
    ordinal: Option<PluralRuleSet>,
    renderer: Box<dyn NumberRenderer>,
    max_depth: usize,
}

impl RbnfRegistry {
    /// Create an empty registry with the plain number renderer.
    pub fn new() -> Self {
        Self {
            rule_sets: BTreeMap::new(),
            cardinal: None,
            ordinal: None,
            renderer: Box::new(PlainNumberRenderer),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Use `rules` for plural selectors of the given kind.
    pub fn with_plural_rules(mut self, kind: PluralRuleType, rules: PluralRuleSet) -> Self {
        match kind {
            PluralRuleType::Cardinal => self.cardinal = Some(rules),
            PluralRuleType::Ordinal => self.ordinal = Some(rules),
        }
        self
    }

    /// Use `renderer` for decimal-pattern substitutions.
    pub fn with_renderer(mut self, renderer: impl NumberRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Limit nested rule-set calls per formatting call.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Add a rule set, replacing any rule set with the same name.
    pub fn insert(&mut self, rule_set: RbnfRuleSet) -> Option<RbnfRuleSet> {
        debug!("registered rule set '{}'", rule_set.name());
        self.rule_sets.insert(rule_set.name().to_string(), rule_set)
    }

    /// Get a rule set by name; a leading `%` or `%%` is ignored.
    pub fn get(&self, name: &str) -> Option<&RbnfRuleSet> {
        self.rule_sets.get(name.trim_start_matches('%'))
    }

    /// Registered rule-set names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rule_sets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rule_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_sets.is_empty()
    }

    /// The plural rules registered for `kind`, if any.
    pub fn plural_rules(&self, kind: PluralRuleType) -> Option<&PluralRuleSet> {
        match kind {
            PluralRuleType::Cardinal => self.cardinal.as_ref(),
            PluralRuleType::Ordinal => self.ordinal.as_ref(),
        }
    }

    pub fn renderer(&self) -> &dyn NumberRenderer {
        self.renderer.as_ref()
    }

    /// `(rule set, missing reference)` pairs for references no registered
    /// rule set satisfies.
    pub fn unresolved_references(&self) -> BTreeSet<(String, String)> {
        self.rule_sets
            .values()
            .flat_map(|set| {
                set.depends_on()
                    .iter()
                    .filter(|name| !self.rule_sets.contains_key(name.as_str()))
                    .map(|name| (set.name().to_string(), name.clone()))
            })
            .collect()
    }

    /// Format `n` with the named rule set.
    pub fn format(&self, name: &str, n: f64) -> Result<String, EvalError> {
        self.lookup(name, name)?.format(n, self)
    }

    /// Resolve a reference made from rule set `from`.
    pub(crate) fn lookup(&self, name: &str, from: &str) -> Result<&RbnfRuleSet, EvalError> {
        self.get(name).ok_or_else(|| {
            let available: Vec<String> = self.rule_sets.keys().cloned().collect();
            let name = name.trim_start_matches('%');
            EvalError::UnknownRuleSetReference {
                name: name.to_string(),
                from: from.trim_start_matches('%').to_string(),
                suggestions: compute_suggestions(name, &available),
            }
        })
    }

    pub(crate) fn eval_context(&self) -> EvalContext {
        EvalContext::with_max_depth(self.max_depth)
    }
}

impl Default for RbnfRegistry {
    fn default() -> Self {
        RbnfRegistry::new()
    }
}

impl Debug for RbnfRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RbnfRegistry")
            .field("rule_sets", &self.rule_sets.keys().collect::<Vec<_>>())
            .field("cardinal", &self.cardinal.is_some())
            .field("ordinal", &self.ordinal.is_some())
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
