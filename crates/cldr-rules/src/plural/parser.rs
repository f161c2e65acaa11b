//! Plural condition parser using winnow.
//!
//! Parses TR35 plural conditions such as `n % 10 = 1 and n % 100 != 11` into a
//! [`Condition`]. Precedence from loosest to tightest is `or`, `and`, relation,
//! `mod`, range list. Both the legacy keywords (`is`, `in`, `within`, `mod`) and
//! the modern symbols (`=`, `!=`, `%`) are accepted.

use winnow::ascii::digit1;
use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat, separated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::stream::Stream;
use winnow::token::take_while;

use super::ast::{Condition, Expr, RangeItem, RangeList};
use crate::error::CompileError;
use crate::operands::Operand;

/// Parse one plural condition.
///
/// Sample annotations (`@integer …`, `@decimal …`) are ignored and runs of
/// whitespace are collapsed before parsing. An empty condition is an error;
/// rule-set compilation skips empty rules before they reach the parser.
///
/// # Example
///
/// ```
/// use cldr_rules::compile_plural_condition;
///
/// let condition = compile_plural_condition("n % 10 = 1 and n % 100 != 11 @integer 1, 21").unwrap();
/// assert_eq!(condition.to_string(), "n mod 10 in 1 and n mod 100 not in 11");
/// ```
pub fn parse_condition(text: &str) -> Result<Condition, CompileError> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return Err(syntax_error(&normalized, &normalized, "empty condition"));
    }

    let mut remaining = normalized.as_str();
    match condition(&mut remaining) {
        Ok(c) if remaining.trim().is_empty() => Ok(c),
        Ok(_) => Err(syntax_error(&normalized, remaining, "unexpected input")),
        Err(_) => Err(syntax_error(&normalized, remaining, "malformed condition")),
    }
}

/// Strip sample annotations and collapse whitespace.
pub(crate) fn normalize(text: &str) -> String {
    let condition = text.split_once('@').map_or(text, |(before, _)| before);
    condition.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn syntax_error(rule: &str, remaining: &str, message: &str) -> CompileError {
    let remaining = remaining.trim_start();
    let column = rule.len() - remaining.len() + 1;
    let offending = match remaining {
        "" => "end of input".to_string(),
        rest => rest.to_string(),
    };
    CompileError::PluralRuleSyntax {
        rule: rule.to_string(),
        offending,
        column,
        message: message.to_string(),
    }
}

/// Relational operators, before the right-hand side is parsed.
#[derive(Debug, Clone, Copy)]
enum RelOp {
    Is,
    IsNot,
    In,
    NotIn,
    Within,
    NotWithin,
}

/// Parse an `or`-separated list of `and` conditions.
fn condition(input: &mut &str) -> ModalResult<Condition> {
    let first = and_condition(input)?;
    let rest: Vec<Condition> =
        repeat(0.., preceded(keyword("or"), cut_err(and_condition))).parse_next(input)?;
    Ok(rest.into_iter().fold(first, |acc, c| {
        Condition::Or(Box::new(acc), Box::new(c))
    }))
}

/// Parse an `and`-separated list of relations.
fn and_condition(input: &mut &str) -> ModalResult<Condition> {
    let first = relation_term(input)?;
    let rest: Vec<Condition> =
        repeat(0.., preceded(keyword("and"), cut_err(relation_term))).parse_next(input)?;
    Ok(rest.into_iter().fold(first, |acc, c| {
        Condition::And(Box::new(acc), Box::new(c))
    }))
}

/// Parse a negated term, a parenthesized condition, or a relation.
fn relation_term(input: &mut &str) -> ModalResult<Condition> {
    alt((negation, parenthesized, relation)).parse_next(input)
}

fn negation(input: &mut &str) -> ModalResult<Condition> {
    preceded(keyword("not"), cut_err(alt((parenthesized, relation))))
        .map(|c| Condition::Not(Box::new(c)))
        .parse_next(input)
}

fn parenthesized(input: &mut &str) -> ModalResult<Condition> {
    delimited(symbol("("), cut_err(condition), cut_err(symbol(")"))).parse_next(input)
}

/// Parse `expr op rhs`.
fn relation(input: &mut &str) -> ModalResult<Condition> {
    let lhs = expr(input)?;
    let op = cut_err(relation_op).parse_next(input)?;
    let condition = match op {
        RelOp::Is => Condition::Is(lhs, cut_err(expr).parse_next(input)?),
        RelOp::IsNot => Condition::IsNot(lhs, cut_err(expr).parse_next(input)?),
        RelOp::In => Condition::In(lhs, cut_err(range_list).parse_next(input)?),
        RelOp::NotIn => Condition::NotIn(lhs, cut_err(range_list).parse_next(input)?),
        RelOp::Within => Condition::Within(lhs, cut_err(range_list).parse_next(input)?),
        RelOp::NotWithin => Condition::NotWithin(lhs, cut_err(range_list).parse_next(input)?),
    };
    Ok(condition)
}

fn relation_op(input: &mut &str) -> ModalResult<RelOp> {
    alt((
        (keyword("is"), opt(keyword("not")))
            .map(|(_, not)| if not.is_some() { RelOp::IsNot } else { RelOp::Is }),
        keyword("in").value(RelOp::In),
        keyword("within").value(RelOp::Within),
        preceded(
            keyword("not"),
            alt((
                keyword("in").value(RelOp::NotIn),
                keyword("within").value(RelOp::NotWithin),
            )),
        ),
        symbol("!=").value(RelOp::NotIn),
        symbol("=").value(RelOp::In),
    ))
    .parse_next(input)
}

/// Parse an operand or literal followed by any number of `mod`/`%` terms.
fn expr(input: &mut &str) -> ModalResult<Expr> {
    let first = primary(input)?;
    let rest: Vec<Expr> = repeat(
        0..,
        preceded(alt((keyword("mod"), symbol("%"))), cut_err(primary)),
    )
    .parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |acc, e| Expr::Mod(Box::new(acc), Box::new(e))))
}

fn primary(input: &mut &str) -> ModalResult<Expr> {
    alt((number.map(Expr::Literal), operand.map(Expr::Operand))).parse_next(input)
}

/// Parse a single operand letter.
///
/// Any other word at operand position is a hard error, with the input left at
/// the start of the word so the error points at it.
fn operand(input: &mut &str) -> ModalResult<Operand> {
    ws(input)?;
    let start = input.checkpoint();
    let word = alpha_word(input)?;
    let mut chars = word.chars();
    match (chars.next().and_then(Operand::from_char), chars.next()) {
        (Some(op), None) => Ok(op),
        _ => {
            input.reset(&start);
            Err(ErrMode::Cut(ContextError::new()))
        }
    }
}

fn number(input: &mut &str) -> ModalResult<u64> {
    preceded(ws, digit1.try_map(str::parse::<u64>)).parse_next(input)
}

/// Parse a comma-separated list of values and `a..b` ranges.
fn range_list(input: &mut &str) -> ModalResult<RangeList> {
    separated(1.., range_item, symbol(","))
        .map(RangeList)
        .parse_next(input)
}

fn range_item(input: &mut &str) -> ModalResult<RangeItem> {
    let min = number(input)?;
    let max = opt(preceded(symbol(".."), cut_err(number))).parse_next(input)?;
    Ok(match max {
        Some(max) => RangeItem::Range(min, max),
        None => RangeItem::Number(min),
    })
}

/// Parse a whole alphabetic word equal to `kw`.
fn keyword<'i>(kw: &'static str) -> impl Parser<&'i str, &'i str, ErrMode<ContextError>> {
    preceded(ws, alpha_word).verify(move |w: &&str| *w == kw)
}

/// Parse punctuation, skipping leading whitespace.
fn symbol<'i>(s: &'static str) -> impl Parser<&'i str, &'i str, ErrMode<ContextError>> {
    preceded(ws, s)
}

fn alpha_word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphabetic()).parse_next(input)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_samples_and_whitespace() {
        assert_eq!(
            normalize("  i = 1   and\tv = 0 @integer 1 @decimal 1.0"),
            "i = 1 and v = 0"
        );
        assert_eq!(normalize(" @integer 0, 2~16, 100"), "");
    }

    #[test]
    fn keyword_requires_whole_word() {
        let mut input = "within 1";
        assert!(keyword("w").parse_next(&mut input).is_err());
    }

    #[test]
    fn operand_skips_leading_whitespace() {
        let mut input = "   v = 0";
        assert_eq!(operand(&mut input).unwrap(), Operand::V);
        assert_eq!(input, " = 0");
    }

    #[test]
    fn mod_is_left_associative() {
        let mut input = "n mod 10 % 3";
        let e = expr(&mut input).unwrap();
        assert_eq!(
            e,
            Expr::Mod(
                Box::new(Expr::Mod(
                    Box::new(Expr::Operand(Operand::N)),
                    Box::new(Expr::Literal(10))
                )),
                Box::new(Expr::Literal(3))
            )
        );
    }
}
