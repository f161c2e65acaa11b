//! Compiled plural rule sets.
//!
//! A rule set evaluates its rules in declaration order and returns the first
//! matching category, falling back to `"other"`. Only the operands that at
//! least one rule reads are derived for each call.

use std::borrow::Cow;
use std::fmt::{Display, Formatter, Result as FmtResult};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::ast::Condition;
use super::parser::{normalize, parse_condition};
use crate::cache::CompileCache;
use crate::error::{CompileError, EvalError};
use crate::operands::{OperandSet, PluralOperands, decimal_text};

/// The category every rule set falls back to.
pub const OTHER: &str = "other";

/// Whether a rule set classifies cardinal or ordinal numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralRuleType {
    Cardinal,
    Ordinal,
}

impl Display for PluralRuleType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PluralRuleType::Cardinal => write!(f, "cardinal"),
            PluralRuleType::Ordinal => write!(f, "ordinal"),
        }
    }
}

/// One compiled rule: a category and the condition that selects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralRule {
    pub category: String,
    pub condition: Condition,
}

/// A number to classify, kept as decimal text.
///
/// Integers convert without loss and floats use their shortest round-trip
/// decimal form. Text is read as a base-10 integer: an optional sign followed
/// by the leading digits, so `"1.5"` and `"2e1"` classify like 1 and 2. Text
/// without leading digits has no value and classifies as `"other"`. To
/// classify decimal text with its fraction digits, use
/// [`PluralOperands::parse`] with [`PluralRuleSet::select_operands`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralInput<'a>(Option<Cow<'a, str>>);

impl PluralInput<'_> {
    /// The decimal text operands are derived from, if the input has a value.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Leading base-10 integer of `text`: optional whitespace and sign, then digits.
fn integer_prefix(text: &str) -> Option<&str> {
    let text = text.trim_start();
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let sign_len = text.len() - unsigned.len();
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    (digits > 0).then(|| &text[..sign_len + digits])
}

impl<'a> From<&'a str> for PluralInput<'a> {
    fn from(text: &'a str) -> Self {
        PluralInput(integer_prefix(text).map(Cow::Borrowed))
    }
}

impl<'a> From<&'a String> for PluralInput<'a> {
    fn from(text: &'a String) -> Self {
        PluralInput::from(text.as_str())
    }
}

impl From<String> for PluralInput<'_> {
    fn from(text: String) -> Self {
        PluralInput(integer_prefix(&text).map(|digits| Cow::Owned(digits.to_string())))
    }
}

impl From<f64> for PluralInput<'_> {
    fn from(n: f64) -> Self {
        PluralInput(Some(Cow::Owned(
            decimal_text(n).unwrap_or_else(|| n.to_string()),
        )))
    }
}

macro_rules! plural_input_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PluralInput<'_> {
                fn from(n: $t) -> Self {
                    PluralInput(Some(Cow::Owned(n.to_string())))
                }
            }
        )*
    };
}

plural_input_from_integer!(i32, i64, u32, u64, usize);

/// A compiled, ordered set of plural rules.
///
/// # Example
///
/// ```
/// use cldr_rules::PluralRuleSet;
///
/// let rules = PluralRuleSet::compile([("one", "n is 1"), ("few", "n = 2..4")]).unwrap();
/// assert_eq!(rules.select(1).unwrap(), "one");
/// assert_eq!(rules.select(3).unwrap(), "few");
/// assert_eq!(rules.select(5).unwrap(), "other");
/// assert_eq!(rules.select("1").unwrap(), "one");
/// assert_eq!(rules.select("3.7").unwrap(), "few");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralRuleSet {
    rules: Vec<PluralRule>,
    categories: Vec<String>,
    used: OperandSet,
}

impl PluralRuleSet {
    /// Compile ordered `(category, condition)` pairs.
    ///
    /// Rules whose condition is empty once sample annotations are removed are
    /// skipped; CLDR emits such placeholder rules for `other`.
    pub fn compile<I, C, T>(rules: I) -> Result<PluralRuleSet, CompileError>
    where
        I: IntoIterator<Item = (C, T)>,
        C: Into<String>,
        T: AsRef<str>,
    {
        PluralRuleSet::compile_inner(rules, None)
    }

    /// Compile like [`PluralRuleSet::compile`], reusing parsed conditions.
    pub fn compile_cached<I, C, T>(
        rules: I,
        cache: &mut CompileCache,
    ) -> Result<PluralRuleSet, CompileError>
    where
        I: IntoIterator<Item = (C, T)>,
        C: Into<String>,
        T: AsRef<str>,
    {
        PluralRuleSet::compile_inner(rules, Some(cache))
    }

    fn compile_inner<I, C, T>(
        rules: I,
        mut cache: Option<&mut CompileCache>,
    ) -> Result<PluralRuleSet, CompileError>
    where
        I: IntoIterator<Item = (C, T)>,
        C: Into<String>,
        T: AsRef<str>,
    {
        let mut compiled = Vec::new();
        let mut categories: Vec<String> = Vec::new();
        let mut used = OperandSet::EMPTY;

        for (category, text) in rules {
            let category: String = category.into();
            if category != OTHER && !categories.contains(&category) {
                categories.push(category.clone());
            }

            let text = text.as_ref();
            if normalize(text).is_empty() {
                trace!("skipping empty plural rule '{category}'");
                continue;
            }

            let parsed = match cache.as_deref_mut() {
                Some(cache) => cache.condition(text),
                None => parse_condition(text),
            };
            let condition = parsed.map_err(|source| CompileError::InPluralRule {
                category: category.clone(),
                source: Box::new(source),
            })?;

            used = used.union(condition.operands());
            compiled.push(PluralRule {
                category,
                condition,
            });
        }
        categories.push(OTHER.to_string());

        debug!(
            "compiled {} plural rules reading operands [{used}]",
            compiled.len()
        );
        Ok(PluralRuleSet {
            rules: compiled,
            categories,
            used,
        })
    }

    /// Classify a number, given as an integer, float or integer text.
    ///
    /// See [`PluralInput`] for how text is read.
    pub fn select<'a>(&self, input: impl Into<PluralInput<'a>>) -> Result<&str, EvalError> {
        match self.operands_for(input)? {
            Some(operands) => Ok(self.select_operands(&operands)),
            None => Ok(OTHER),
        }
    }

    /// Classify already derived operands.
    pub fn select_operands(&self, operands: &PluralOperands) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.condition.matches(operands))
            .map_or(OTHER, |rule| rule.category.as_str())
    }

    /// The operands [`PluralRuleSet::select`] derives for `input`, or `None`
    /// for text without a leading integer.
    pub fn operands_for<'a>(
        &self,
        input: impl Into<PluralInput<'a>>,
    ) -> Result<Option<PluralOperands>, EvalError> {
        input
            .into()
            .as_str()
            .map(|text| PluralOperands::compute(text, self.used))
            .transpose()
    }

    /// Declared categories in declaration order, followed by `"other"`.
    pub fn available_plural_classes(&self) -> Vec<&str> {
        self.categories.iter().map(String::as_str).collect()
    }

    /// Operands read by at least one rule.
    pub fn used_operands(&self) -> OperandSet {
        self.used
    }

    /// The compiled rules, in evaluation order.
    pub fn rules(&self) -> &[PluralRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_prefix_stops_at_first_non_digit() {
        assert_eq!(integer_prefix("42"), Some("42"));
        assert_eq!(integer_prefix(" -7.9"), Some("-7"));
        assert_eq!(integer_prefix("+3e2"), Some("+3"));
        assert_eq!(integer_prefix("12 apples"), Some("12"));
        assert_eq!(integer_prefix("twelve"), None);
        assert_eq!(integer_prefix("-"), None);
        assert_eq!(integer_prefix(".5"), None);
    }
}
