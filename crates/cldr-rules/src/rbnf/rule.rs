//! Compilation of one RBNF rule body.
//!
//! The meaning of `<<`, `>>` and `==` depends on the rule they appear in, so
//! tokens are resolved here against a [`RuleContext`]: the rule's base value,
//! its radix and the rule set that contains it.

use bon::Builder;

use super::ast::{BaseValue, Marker, RbnfNode, RbnfRule, SubstitutionOp, Target};
use super::parser::{Token, tokenize};
use crate::error::CompileError;

/// Rule set used by `<<` in fraction rule sets when no target is named.
pub const DEFAULT_RULE_SET: &str = "spellout-numbering";

/// Everything needed to give a rule body's substitutions their meaning.
///
/// # Example
///
/// ```
/// use cldr_rules::rbnf::{BaseValue, RuleContext};
///
/// let context = RuleContext::builder()
///     .base(BaseValue::Number(100))
///     .rule_set("spellout-cardinal")
///     .build();
/// assert_eq!(context.radix, 10);
/// assert_eq!(context.default_rule_set, "spellout-numbering");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Builder)]
#[builder(on(String, into))]
pub struct RuleContext {
    /// The rule's base value or special marker.
    pub base: BaseValue,

    /// Radix used to compute the rule's divisor.
    #[builder(default = 10)]
    pub radix: u32,

    /// Name of the rule set containing the rule, without `%` prefixes.
    pub rule_set: String,

    /// Whether every rule of the containing set is a fraction rule.
    #[builder(default)]
    pub fraction_rule_set: bool,

    /// Rule set that a target-less `<<` in a fraction rule set falls back to.
    #[builder(default = DEFAULT_RULE_SET.to_string())]
    pub default_rule_set: String,
}

/// Compile one rule body in its context.
///
/// # Example
///
/// ```
/// use cldr_rules::compile_rbnf_rule;
/// use cldr_rules::rbnf::{BaseValue, RuleContext};
///
/// let context = RuleContext::builder()
///     .base(BaseValue::Negative)
///     .rule_set("spellout-cardinal")
///     .build();
/// assert!(compile_rbnf_rule("minus >>;", &context).is_ok());
/// assert!(compile_rbnf_rule("minus <<;", &context).is_err());
/// ```
pub fn compile_rule(body: &str, context: &RuleContext) -> Result<RbnfRule, CompileError> {
    if context.radix < 2 {
        return Err(CompileError::InvalidRadix {
            key: context.base.to_string(),
            radix: context.radix,
        });
    }

    let divisor = divisor_for(context.base, context.radix);
    let tokens = tokenize(body)?;
    let nodes = tokens
        .into_iter()
        .map(|token| resolve(token, body, context, divisor))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RbnfRule {
        base: context.base,
        radix: context.radix,
        divisor,
        nodes,
    })
}

/// Largest power of `radix` not exceeding a numeric base value, else 1.
pub(crate) fn divisor_for(base: BaseValue, radix: u32) -> u64 {
    let BaseValue::Number(value) = base else {
        return 1;
    };
    let radix = u64::from(radix);
    let mut divisor: u64 = 1;
    while let Some(next) = divisor.checked_mul(radix) {
        if next > value {
            break;
        }
        divisor = next;
    }
    divisor
}

fn resolve(
    token: Token,
    body: &str,
    context: &RuleContext,
    divisor: u64,
) -> Result<RbnfNode, CompileError> {
    match token {
        Token::Text(text) => Ok(RbnfNode::Literal(text)),
        Token::Substitution { marker, target } => {
            resolve_substitution(marker, target, body, context, divisor)
        }
        Token::Optional(tokens) => {
            let nodes = tokens
                .into_iter()
                .map(|token| resolve(token, body, context, divisor))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RbnfNode::Optional {
                nodes,
                trigger: context.base,
                divisor,
            })
        }
        Token::Plural { kind, cases } => Ok(RbnfNode::PluralSelector {
            kind,
            cases,
            divisor,
        }),
    }
}

fn resolve_substitution(
    marker: Marker,
    target: Option<String>,
    body: &str,
    context: &RuleContext,
    divisor: u64,
) -> Result<RbnfNode, CompileError> {
    let error = |message: &str| CompileError::RbnfRuleSyntax {
        rule: body.to_string(),
        offending: format!(
            "{0}{1}{0}",
            marker.as_char(),
            target.as_deref().unwrap_or_default()
        ),
        message: message.to_string(),
    };
    let base = context.base;
    let containing = || Target::RuleSet(context.rule_set.clone());

    if matches!(base, BaseValue::Infinity | BaseValue::NaN) {
        return Err(error("substitutions are not allowed in Inf and NaN rules"));
    }

    let (op, default_target) = match marker {
        Marker::Less => match base {
            BaseValue::Negative => {
                return Err(error("'<<' is not allowed in a negative-number rule"));
            }
            _ if base.is_fraction_rule() => {
                let fallback = if context.fraction_rule_set {
                    Target::RuleSet(context.default_rule_set.clone())
                } else {
                    containing()
                };
                (SubstitutionOp::IntegerPart, Some(fallback))
            }
            _ => (SubstitutionOp::Quotient(divisor), Some(containing())),
        },
        Marker::Greater => match base {
            BaseValue::Negative => (SubstitutionOp::Negate, Some(containing())),
            _ if base.is_fraction_rule() => match target.as_ref() {
                None => (SubstitutionOp::DigitByDigit, Some(containing())),
                Some(_) => (SubstitutionOp::FractionDigits, None),
            },
            _ => (SubstitutionOp::Remainder(divisor), Some(containing())),
        },
        Marker::Equal => {
            let echo = base.is_fraction_rule().then_some(Target::Echo);
            (SubstitutionOp::Identity, echo)
        }
    };

    let target = match target.as_deref() {
        Some(name) if name.starts_with('%') => {
            Target::RuleSet(name.trim_start_matches('%').to_string())
        }
        Some(pattern) if pattern.starts_with(['0', '#']) => {
            Target::DecimalPattern(pattern.to_string())
        }
        Some(_) => return Err(error("unrecognized substitution target")),
        None => default_target.ok_or_else(|| {
            error("'==' without a target is only allowed in master and fraction rules")
        })?,
    };

    Ok(RbnfNode::Substitution { marker, op, target })
}
