//! Public AST types for compiled RBNF rules.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::CompileError;
use crate::operands::{decimal_text, fraction_digits};
use crate::plural::PluralRuleType;

/// The key a rule is registered under: a numeric threshold or a special marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseValue {
    /// Applies to values from this number up to the next numeric rule.
    Number(u64),
    /// `-x`: negative numbers.
    Negative,
    /// `x.x`: numbers with a fractional part.
    Improper,
    /// `0.x`: numbers strictly between 0 and 1.
    Proper,
    /// `x.0`: the master rule for fractional numbers.
    Master,
    /// `Inf`: positive infinity.
    Infinity,
    /// `NaN`: not a number.
    NaN,
}

impl BaseValue {
    /// Whether substitutions in this rule operate on integer and fraction parts.
    pub fn is_fraction_rule(self) -> bool {
        matches!(self, BaseValue::Improper | BaseValue::Proper | BaseValue::Master)
    }
}

impl FromStr for BaseValue {
    type Err = CompileError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key.trim() {
            "-x" => Ok(BaseValue::Negative),
            "x.x" => Ok(BaseValue::Improper),
            "0.x" => Ok(BaseValue::Proper),
            "x.0" => Ok(BaseValue::Master),
            "Inf" => Ok(BaseValue::Infinity),
            "NaN" => Ok(BaseValue::NaN),
            digits => {
                let digits: String = digits.chars().filter(|c| *c != ',').collect();
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(CompileError::InvalidBaseValue {
                        key: key.to_string(),
                    });
                }
                digits
                    .parse()
                    .map(BaseValue::Number)
                    .map_err(|_| CompileError::InvalidBaseValue {
                        key: key.to_string(),
                    })
            }
        }
    }
}

impl Display for BaseValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            BaseValue::Number(n) => write!(f, "{n}"),
            BaseValue::Negative => write!(f, "-x"),
            BaseValue::Improper => write!(f, "x.x"),
            BaseValue::Proper => write!(f, "0.x"),
            BaseValue::Master => write!(f, "x.0"),
            BaseValue::Infinity => write!(f, "Inf"),
            BaseValue::NaN => write!(f, "NaN"),
        }
    }
}

/// The substitution marker as written in the rule body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `<<` or `←←`
    Less,
    /// `>>` or `→→`
    Greater,
    /// `==`
    Equal,
}

impl Marker {
    pub fn as_char(self) -> char {
        match self {
            Marker::Less => '<',
            Marker::Greater => '>',
            Marker::Equal => '=',
        }
    }
}

/// How a substitution derives its value from the number being formatted.
///
/// Resolved when the rule is compiled, from the marker and the rule's base
/// value and radix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubstitutionOp {
    /// `floor(n / divisor)`
    Quotient(u64),
    /// `n mod divisor`
    Remainder(u64),
    /// `floor(n)`
    IntegerPart,
    /// The fraction digits of `n` read as an integer.
    FractionDigits,
    /// Each fraction digit of `n` formatted separately, space-separated.
    DigitByDigit,
    /// `-n`
    Negate,
    /// `n` unchanged.
    Identity,
}

impl SubstitutionOp {
    /// Apply to `n`. [`SubstitutionOp::DigitByDigit`] yields the integer value
    /// of all fraction digits; the evaluator splits them.
    pub fn apply(self, n: f64) -> f64 {
        match self {
            SubstitutionOp::Quotient(divisor) => (n / divisor as f64).floor(),
            SubstitutionOp::Remainder(divisor) => n % divisor as f64,
            SubstitutionOp::IntegerPart => n.floor(),
            SubstitutionOp::FractionDigits | SubstitutionOp::DigitByDigit => {
                fraction_digits_of(n).parse().unwrap_or(0.0)
            }
            SubstitutionOp::Negate => -n,
            SubstitutionOp::Identity => n,
        }
    }
}

/// Visible fraction digits of `n`'s shortest decimal form.
pub(crate) fn fraction_digits_of(n: f64) -> String {
    decimal_text(n.abs())
        .and_then(|text| fraction_digits(&text))
        .unwrap_or_default()
}

/// Where a substitution sends its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// Format through the named rule set.
    RuleSet(String),
    /// Format through the numeric-pattern renderer.
    DecimalPattern(String),
    /// Emit the value's decimal text unchanged.
    Echo,
}

/// One node of a compiled rule body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RbnfNode {
    /// Text emitted verbatim.
    Literal(String),
    /// A value derived from `n`, formatted through a target.
    Substitution {
        marker: Marker,
        op: SubstitutionOp,
        target: Target,
    },
    /// `[…]`: omitted when `n` sits exactly on the rule's boundary.
    Optional {
        nodes: Vec<RbnfNode>,
        trigger: BaseValue,
        divisor: u64,
    },
    /// `$(cardinal,one{…}other{…})$`: text chosen by plural category.
    PluralSelector {
        kind: PluralRuleType,
        cases: Vec<(String, String)>,
        divisor: u64,
    },
}

impl RbnfNode {
    fn collect_dependencies(&self, names: &mut BTreeSet<String>) {
        match self {
            RbnfNode::Substitution {
                target: Target::RuleSet(name),
                ..
            } => {
                names.insert(name.clone());
            }
            RbnfNode::Optional { nodes, .. } => {
                for node in nodes {
                    node.collect_dependencies(names);
                }
            }
            RbnfNode::Literal(_) | RbnfNode::Substitution { .. } | RbnfNode::PluralSelector { .. } => {}
        }
    }
}

/// A compiled RBNF rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RbnfRule {
    pub base: BaseValue,
    pub radix: u32,
    /// Largest power of `radix` not exceeding a numeric base value, else 1.
    pub divisor: u64,
    pub nodes: Vec<RbnfNode>,
}

impl RbnfRule {
    /// Names of the rule sets this rule's substitutions call.
    pub fn depends_on(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for node in &self.nodes {
            node.collect_dependencies(&mut names);
        }
        names
    }
}
