//! Rule evaluation engine for RBNF rule sets.
//!
//! Walks a selected rule's nodes, emitting literals, recursing into referenced
//! rule sets for substitutions and choosing plural-selector text through the
//! registry's plural rules.

use log::trace;

use super::ast::{BaseValue, RbnfNode, SubstitutionOp, Target, fraction_digits_of};
use super::context::EvalContext;
use super::registry::RbnfRegistry;
use super::rule_set::RbnfRuleSet;
use crate::error::EvalError;
use crate::operands::decimal_text;
use crate::plural::OTHER;

impl RbnfRuleSet {
    /// Format `n` into `out`, recursing through `registry`.
    pub(crate) fn render(
        &self,
        n: f64,
        registry: &RbnfRegistry,
        context: &mut EvalContext,
        out: &mut String,
    ) -> Result<(), EvalError> {
        let rule = self.rule_for(n).ok_or_else(|| EvalError::NoApplicableRule {
            rule_set: self.name().to_string(),
            value: value_text(n),
        })?;
        trace!("{}: rule {} for {}", self.name(), rule.base, value_text(n));

        context.push_call(self.name())?;
        let result = render_nodes(&rule.nodes, n, self.name(), registry, context, out);
        context.pop_call();
        result
    }
}

fn render_nodes(
    nodes: &[RbnfNode],
    n: f64,
    rule_set: &str,
    registry: &RbnfRegistry,
    context: &mut EvalContext,
    out: &mut String,
) -> Result<(), EvalError> {
    for node in nodes {
        match node {
            RbnfNode::Literal(text) => out.push_str(text),
            RbnfNode::Substitution {
                op: SubstitutionOp::DigitByDigit,
                target,
                ..
            } => {
                for (i, digit) in fraction_digits_of(n).chars().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    let value = digit.to_digit(10).map_or(0.0, f64::from);
                    render_target(value, target, rule_set, registry, context, out)?;
                }
            }
            RbnfNode::Substitution { op, target, .. } => {
                render_target(op.apply(n), target, rule_set, registry, context, out)?;
            }
            RbnfNode::Optional {
                nodes,
                trigger,
                divisor,
            } => {
                if !is_omitted(n, *trigger, *divisor) {
                    render_nodes(nodes, n, rule_set, registry, context, out)?;
                }
            }
            RbnfNode::PluralSelector {
                kind,
                cases,
                divisor,
            } => {
                let rules =
                    registry
                        .plural_rules(*kind)
                        .ok_or_else(|| EvalError::MissingPluralRules {
                            kind: *kind,
                            rule_set: rule_set.to_string(),
                        })?;
                let value = (n.abs() / *divisor as f64).floor();
                let category = rules.select(value)?;
                let text = cases
                    .iter()
                    .find(|(case, _)| case == category)
                    .or_else(|| cases.iter().find(|(case, _)| case == OTHER))
                    .map_or("", |(_, text)| text.as_str());
                out.push_str(text);
            }
        }
    }
    Ok(())
}

fn render_target(
    value: f64,
    target: &Target,
    from: &str,
    registry: &RbnfRegistry,
    context: &mut EvalContext,
    out: &mut String,
) -> Result<(), EvalError> {
    match target {
        Target::RuleSet(name) => registry
            .lookup(name, from)?
            .render(value, registry, context, out),
        Target::DecimalPattern(pattern) => {
            out.push_str(&registry.renderer().render(value, pattern));
            Ok(())
        }
        Target::Echo => {
            out.push_str(&value_text(value));
            Ok(())
        }
    }
}

/// Whether an optional clause is left out for `n`.
///
/// In numeric rules the clause is omitted when `n` is a multiple of the rule's
/// divisor, which covers `n` equal to the base value. In fraction rules it is
/// omitted when `n` has no fractional part.
fn is_omitted(n: f64, trigger: BaseValue, divisor: u64) -> bool {
    match trigger {
        BaseValue::Number(base) => n == base as f64 || n % divisor as f64 == 0.0,
        BaseValue::Improper | BaseValue::Proper | BaseValue::Master => n == n.floor(),
        BaseValue::Negative | BaseValue::Infinity | BaseValue::NaN => false,
    }
}

fn value_text(n: f64) -> String {
    decimal_text(n).unwrap_or_else(|| n.to_string())
}
