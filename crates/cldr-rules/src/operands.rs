//! CLDR plural operands.
//!
//! Operands are derived from the decimal text of a number rather than from a
//! binary float, so trailing fraction zeros survive: `1.50` and `1.5` differ in
//! `v`, `f` and `t` even though they are the same float.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// Largest exponent accepted in `e`/`c` notation.
const MAX_EXPONENT: i32 = 1024;

/// One of the operands a plural condition may test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operand {
    /// Absolute value of the source number.
    N,
    /// Integer digits of `n`.
    I,
    /// Number of visible fraction digits, with trailing zeros.
    V,
    /// Number of visible fraction digits, without trailing zeros.
    W,
    /// Visible fraction digits as an integer, with trailing zeros.
    F,
    /// Visible fraction digits as an integer, without trailing zeros.
    T,
    /// Decimal exponent.
    E,
    /// Compact decimal exponent, a synonym for `e`.
    C,
}

impl Operand {
    pub const ALL: [Operand; 8] = [
        Operand::N,
        Operand::I,
        Operand::V,
        Operand::W,
        Operand::F,
        Operand::T,
        Operand::E,
        Operand::C,
    ];

    /// Look up an operand by its rule-syntax letter.
    pub fn from_char(c: char) -> Option<Operand> {
        match c {
            'n' => Some(Operand::N),
            'i' => Some(Operand::I),
            'v' => Some(Operand::V),
            'w' => Some(Operand::W),
            'f' => Some(Operand::F),
            't' => Some(Operand::T),
            'e' => Some(Operand::E),
            'c' => Some(Operand::C),
            _ => None,
        }
    }

    /// The letter used for this operand in rule syntax.
    pub fn as_char(self) -> char {
        match self {
            Operand::N => 'n',
            Operand::I => 'i',
            Operand::V => 'v',
            Operand::W => 'w',
            Operand::F => 'f',
            Operand::T => 't',
            Operand::E => 'e',
            Operand::C => 'c',
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_char())
    }
}

/// A set of operands, used to record which operands a rule set reads.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OperandSet(u8);

impl OperandSet {
    pub const EMPTY: OperandSet = OperandSet(0);
    pub const ALL: OperandSet = OperandSet(u8::MAX);

    pub fn insert(&mut self, operand: Operand) {
        self.0 |= operand.bit();
    }

    pub fn contains(self, operand: Operand) -> bool {
        self.0 & operand.bit() != 0
    }

    pub fn union(self, other: OperandSet) -> OperandSet {
        OperandSet(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Operands in the set, in `n i v w f t e c` order.
    pub fn iter(self) -> impl Iterator<Item = Operand> {
        Operand::ALL.into_iter().filter(move |op| self.contains(*op))
    }
}

impl FromIterator<Operand> for OperandSet {
    fn from_iter<T: IntoIterator<Item = Operand>>(iter: T) -> Self {
        let mut set = OperandSet::EMPTY;
        for operand in iter {
            set.insert(operand);
        }
        set
    }
}

impl Debug for OperandSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Display for OperandSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let letters: Vec<String> = self.iter().map(|op| op.to_string()).collect();
        write!(f, "{}", letters.join(","))
    }
}

/// Operand values derived from one number.
///
/// Operands that were not requested are `None`; see [`PluralOperands::compute`].
///
/// # Example
///
/// ```
/// use cldr_rules::{Operand, PluralOperands};
///
/// let ops = PluralOperands::parse("1.230").unwrap();
/// assert_eq!(ops.get(Operand::I), Some(1.0));
/// assert_eq!(ops.get(Operand::V), Some(3.0));
/// assert_eq!(ops.get(Operand::W), Some(2.0));
/// assert_eq!(ops.get(Operand::F), Some(230.0));
/// assert_eq!(ops.get(Operand::T), Some(23.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PluralOperands {
    values: [Option<f64>; 8],
}

impl PluralOperands {
    /// Derive every operand from decimal text.
    pub fn parse(text: &str) -> Result<PluralOperands, EvalError> {
        PluralOperands::compute(text, OperandSet::ALL)
    }

    /// Derive only the operands in `used` from decimal text.
    ///
    /// The text is validated in full even when `used` is empty.
    pub fn compute(text: &str, used: OperandSet) -> Result<PluralOperands, EvalError> {
        let parts = DecimalParts::parse(text).ok_or_else(|| EvalError::InvalidOperandInput {
            input: text.to_string(),
        })?;

        let mut values = [None; 8];
        for operand in used.iter() {
            values[operand as usize] = Some(parts.operand(operand));
        }
        Ok(PluralOperands { values })
    }

    /// The value of `operand`, or `None` if it was not derived.
    pub fn get(&self, operand: Operand) -> Option<f64> {
        self.values[operand as usize]
    }

    /// The set of operands that were derived.
    pub fn computed(&self) -> OperandSet {
        Operand::ALL
            .into_iter()
            .filter(|op| self.values[*op as usize].is_some())
            .collect()
    }
}

/// Shortest decimal text that round-trips `n`, or `None` for NaN and infinities.
///
/// Never uses exponent notation, so the result is valid operand input.
pub fn decimal_text(n: f64) -> Option<String> {
    n.is_finite().then(|| format!("{n}"))
}

/// Visible fraction digits of decimal text, after applying any exponent.
pub(crate) fn fraction_digits(text: &str) -> Option<String> {
    DecimalParts::parse(text).map(|parts| parts.fraction)
}

/// Decimal text split into unsigned integer and fraction digit strings.
#[derive(Debug, PartialEq, Eq)]
struct DecimalParts {
    integer: String,
    fraction: String,
    exponent: i32,
}

impl DecimalParts {
    fn parse(text: &str) -> Option<DecimalParts> {
        let text = text.trim();
        let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
        let (mantissa, exponent) = match unsigned.find(['e', 'E', 'c', 'C']) {
            Some(pos) => (&unsigned[..pos], unsigned[pos + 1..].parse::<i32>().ok()?),
            None => (unsigned, 0),
        };
        if exponent.abs() > MAX_EXPONENT {
            return None;
        }

        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if integer.is_empty() && fraction.is_empty() {
            return None;
        }
        if !all_digits(integer) || !all_digits(fraction) {
            return None;
        }

        Some(DecimalParts::shifted(integer, fraction, exponent))
    }

    /// Move the decimal point `exponent` places to the right.
    fn shifted(integer: &str, fraction: &str, exponent: i32) -> DecimalParts {
        if exponent == 0 {
            return DecimalParts {
                integer: integer.to_string(),
                fraction: fraction.to_string(),
                exponent,
            };
        }

        let digits = format!("{integer}{fraction}");
        let point = integer.len() as i64 + i64::from(exponent);
        let (integer, fraction) = match usize::try_from(point) {
            Err(_) | Ok(0) => {
                let zeros = "0".repeat(point.unsigned_abs() as usize);
                ("0".to_string(), format!("{zeros}{digits}"))
            }
            Ok(point) if point >= digits.len() => {
                let zeros = "0".repeat(point - digits.len());
                (format!("{digits}{zeros}"), String::new())
            }
            Ok(point) => {
                let (int, frac) = digits.split_at(point);
                (int.to_string(), frac.to_string())
            }
        };
        DecimalParts {
            integer,
            fraction,
            exponent,
        }
    }

    fn operand(&self, operand: Operand) -> f64 {
        let trimmed = self.fraction.trim_end_matches('0');
        match operand {
            Operand::N => {
                let integer = if self.integer.is_empty() { "0" } else { &self.integer };
                format!("{integer}.{}0", self.fraction)
                    .parse()
                    .unwrap_or(0.0)
            }
            Operand::I => digits_value(&self.integer),
            Operand::V => self.fraction.len() as f64,
            Operand::W => trimmed.len() as f64,
            Operand::F => digits_value(&self.fraction),
            Operand::T => digits_value(trimmed),
            Operand::E | Operand::C => f64::from(self.exponent),
        }
    }
}

fn digits_value(digits: &str) -> f64 {
    if digits.is_empty() {
        0.0
    } else {
        digits.parse().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponent_shifts_decimal_point() {
        let parts = DecimalParts::parse("1.2c3").unwrap();
        assert_eq!(parts.integer, "1200");
        assert_eq!(parts.fraction, "");

        let parts = DecimalParts::parse("1.23456e3").unwrap();
        assert_eq!(parts.integer, "1234");
        assert_eq!(parts.fraction, "56");

        let parts = DecimalParts::parse("12e-3").unwrap();
        assert_eq!(parts.integer, "0");
        assert_eq!(parts.fraction, "012");
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["", ".", "abc", "1.2.3", "1e", "--1", "1,000", "1e99999"] {
            assert!(DecimalParts::parse(text).is_none(), "accepted {text:?}");
        }
    }
}
