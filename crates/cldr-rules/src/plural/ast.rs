//! Public AST types for plural conditions.
//!
//! These types are public so callers can inspect compiled rules. The
//! [`Display`] implementations print text that parses back to an equivalent
//! condition.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::operands::{Operand, OperandSet, PluralOperands};

/// A numeric expression: the left-hand side of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// An integer literal.
    Literal(u64),
    /// One of the plural operands.
    Operand(Operand),
    /// Remainder of the left expression divided by the right, left-associative.
    Mod(Box<Expr>, Box<Expr>),
}

/// A parsed plural condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    /// `a is b`
    Is(Expr, Expr),
    /// `a is not b`
    IsNot(Expr, Expr),
    /// `a and b`
    And(Box<Condition>, Box<Condition>),
    /// `a or b`
    Or(Box<Condition>, Box<Condition>),
    /// `not (a)`
    Not(Box<Condition>),
    /// `x in list`, `x = list`: integers in the list only.
    In(Expr, RangeList),
    /// `x not in list`, `x != list`
    NotIn(Expr, RangeList),
    /// `x within list`: any value inside the list's bounds.
    Within(Expr, RangeList),
    /// `x not within list`
    NotWithin(Expr, RangeList),
}

/// A comma-separated list of values and inclusive ranges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeList(pub Vec<RangeItem>);

/// One entry of a [`RangeList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeItem {
    /// A single value, matched by equality.
    Number(u64),
    /// An inclusive `min..max` range.
    Range(u64, u64),
}

impl Expr {
    /// Evaluate against derived operands; `None` if an operand is missing.
    pub fn eval(&self, operands: &PluralOperands) -> Option<f64> {
        match self {
            Expr::Literal(v) => Some(*v as f64),
            Expr::Operand(op) => operands.get(*op),
            Expr::Mod(lhs, rhs) => Some(lhs.eval(operands)? % rhs.eval(operands)?),
        }
    }

    fn collect_operands(&self, set: &mut OperandSet) {
        match self {
            Expr::Literal(_) => {}
            Expr::Operand(op) => set.insert(*op),
            Expr::Mod(lhs, rhs) => {
                lhs.collect_operands(set);
                rhs.collect_operands(set);
            }
        }
    }
}

impl Condition {
    /// Whether the condition holds for the given operands.
    pub fn matches(&self, operands: &PluralOperands) -> bool {
        match self {
            Condition::Is(a, b) => equal(a.eval(operands), b.eval(operands)),
            Condition::IsNot(a, b) => !equal(a.eval(operands), b.eval(operands)),
            Condition::And(a, b) => a.matches(operands) && b.matches(operands),
            Condition::Or(a, b) => a.matches(operands) || b.matches(operands),
            Condition::Not(c) => !c.matches(operands),
            Condition::In(x, list) => x
                .eval(operands)
                .is_some_and(|v| v == v.floor() && list.contains(v)),
            Condition::NotIn(x, list) => !x
                .eval(operands)
                .is_some_and(|v| v == v.floor() && list.contains(v)),
            Condition::Within(x, list) => x.eval(operands).is_some_and(|v| list.contains(v)),
            Condition::NotWithin(x, list) => !x.eval(operands).is_some_and(|v| list.contains(v)),
        }
    }

    /// The operands this condition reads.
    pub fn operands(&self) -> OperandSet {
        let mut set = OperandSet::EMPTY;
        self.collect_operands(&mut set);
        set
    }

    fn collect_operands(&self, set: &mut OperandSet) {
        match self {
            Condition::Is(a, b) | Condition::IsNot(a, b) => {
                a.collect_operands(set);
                b.collect_operands(set);
            }
            Condition::And(a, b) | Condition::Or(a, b) => {
                a.collect_operands(set);
                b.collect_operands(set);
            }
            Condition::Not(c) => c.collect_operands(set),
            Condition::In(x, _)
            | Condition::NotIn(x, _)
            | Condition::Within(x, _)
            | Condition::NotWithin(x, _) => x.collect_operands(set),
        }
    }
}

fn equal(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

impl RangeList {
    /// Whether `value` equals a listed number or lies inside a listed range.
    ///
    /// Entries are tested left to right and the first hit wins.
    pub fn contains(&self, value: f64) -> bool {
        self.0.iter().any(|item| match *item {
            RangeItem::Number(v) => value == v as f64,
            RangeItem::Range(min, max) => value >= min as f64 && value <= max as f64,
        })
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Expr::Literal(v) => write!(f, "{v}"),
            Expr::Operand(op) => write!(f, "{op}"),
            Expr::Mod(lhs, rhs) => write!(f, "{lhs} mod {rhs}"),
        }
    }
}

impl Display for RangeItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RangeItem::Number(v) => write!(f, "{v}"),
            RangeItem::Range(min, max) => write!(f, "{min}..{max}"),
        }
    }
}

impl Display for RangeList {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Condition::Is(a, b) => write!(f, "{a} is {b}"),
            Condition::IsNot(a, b) => write!(f, "{a} is not {b}"),
            Condition::Or(a, b) => write!(f, "{a} or {b}"),
            Condition::And(a, b) => {
                write_and_operand(f, a)?;
                write!(f, " and ")?;
                write_and_operand(f, b)
            }
            Condition::Not(c) => write!(f, "not ({c})"),
            Condition::In(x, list) => write!(f, "{x} in {list}"),
            Condition::NotIn(x, list) => write!(f, "{x} not in {list}"),
            Condition::Within(x, list) => write!(f, "{x} within {list}"),
            Condition::NotWithin(x, list) => write!(f, "{x} not within {list}"),
        }
    }
}

/// `or` binds looser than `and`, so an `or` under an `and` needs parentheses.
fn write_and_operand(f: &mut Formatter<'_>, c: &Condition) -> FmtResult {
    match c {
        Condition::Or(..) => write!(f, "({c})"),
        _ => write!(f, "{c}"),
    }
}
