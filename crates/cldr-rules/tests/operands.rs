//! Tests for plural operand derivation.

use cldr_rules::{EvalError, Operand, OperandSet, PluralOperands, decimal_text};

fn operand(text: &str, op: Operand) -> f64 {
    PluralOperands::parse(text).unwrap().get(op).unwrap()
}

// =============================================================================
// Fraction operands
// =============================================================================

#[test]
fn test_fraction_operands_keep_trailing_zeros() {
    let ops = PluralOperands::parse("1.230").unwrap();
    assert_eq!(ops.get(Operand::N), Some(1.23));
    assert_eq!(ops.get(Operand::I), Some(1.0));
    assert_eq!(ops.get(Operand::V), Some(3.0));
    assert_eq!(ops.get(Operand::W), Some(2.0));
    assert_eq!(ops.get(Operand::F), Some(230.0));
    assert_eq!(ops.get(Operand::T), Some(23.0));
    assert_eq!(ops.get(Operand::E), Some(0.0));
}

#[test]
fn test_leading_fraction_zeros() {
    assert_eq!(operand("0.012", Operand::V), 3.0);
    assert_eq!(operand("0.012", Operand::F), 12.0);
    assert_eq!(operand("0.012", Operand::T), 12.0);
    assert_eq!(operand("0.012", Operand::I), 0.0);
}

#[test]
fn test_same_float_different_text() {
    assert_eq!(operand("1.5", Operand::V), 1.0);
    assert_eq!(operand("1.50", Operand::V), 2.0);
    assert_eq!(operand("1.50", Operand::W), 1.0);
    assert_eq!(operand("1.50", Operand::F), 50.0);
    assert_eq!(operand("1.50", Operand::T), 5.0);
    assert_eq!(operand("1.0", Operand::V), 1.0);
    assert_eq!(operand("1.0", Operand::T), 0.0);
}

#[test]
fn test_integer_operands() {
    let ops = PluralOperands::parse("5").unwrap();
    assert_eq!(ops.get(Operand::N), Some(5.0));
    assert_eq!(ops.get(Operand::I), Some(5.0));
    assert_eq!(ops.get(Operand::V), Some(0.0));
    assert_eq!(ops.get(Operand::W), Some(0.0));
    assert_eq!(ops.get(Operand::F), Some(0.0));
    assert_eq!(ops.get(Operand::T), Some(0.0));
}

#[test]
fn test_negative_input_uses_absolute_value() {
    assert_eq!(operand("-5", Operand::N), 5.0);
    assert_eq!(operand("-5", Operand::I), 5.0);
    assert_eq!(operand("-2.5", Operand::F), 5.0);
}

// =============================================================================
// Exponents
// =============================================================================

#[test]
fn test_compact_exponent() {
    let ops = PluralOperands::parse("1.2c3").unwrap();
    assert_eq!(ops.get(Operand::N), Some(1200.0));
    assert_eq!(ops.get(Operand::I), Some(1200.0));
    assert_eq!(ops.get(Operand::V), Some(0.0));
    assert_eq!(ops.get(Operand::E), Some(3.0));
    assert_eq!(ops.get(Operand::C), Some(3.0));
}

#[test]
fn test_exponent_leaves_fraction() {
    let ops = PluralOperands::parse("1.23456e3").unwrap();
    assert_eq!(ops.get(Operand::I), Some(1234.0));
    assert_eq!(ops.get(Operand::V), Some(2.0));
    assert_eq!(ops.get(Operand::F), Some(56.0));
}

// =============================================================================
// Selective derivation and errors
// =============================================================================

#[test]
fn test_compute_derives_only_requested_operands() {
    let used: OperandSet = [Operand::I, Operand::V].into_iter().collect();
    let ops = PluralOperands::compute("1.5", used).unwrap();
    assert_eq!(ops.computed(), used);
    assert_eq!(ops.get(Operand::I), Some(1.0));
    assert_eq!(ops.get(Operand::N), None);
    assert_eq!(ops.get(Operand::T), None);
}

#[test]
fn test_compute_validates_even_without_operands() {
    assert_eq!(
        PluralOperands::compute("abc", OperandSet::EMPTY),
        Err(EvalError::InvalidOperandInput {
            input: "abc".to_string()
        })
    );
}

#[test]
fn test_invalid_input() {
    for text in ["", "abc", "1.2.3", "1e", "one", "1,5"] {
        assert!(
            matches!(
                PluralOperands::parse(text),
                Err(EvalError::InvalidOperandInput { .. })
            ),
            "accepted {text:?}"
        );
    }
}

#[test]
fn test_operand_set_display() {
    let set: OperandSet = [Operand::V, Operand::I, Operand::N].into_iter().collect();
    assert_eq!(set.to_string(), "n,i,v");
    assert_eq!(set.len(), 3);
    assert!(OperandSet::EMPTY.is_empty());
}

#[test]
fn test_decimal_text() {
    assert_eq!(decimal_text(1.5).as_deref(), Some("1.5"));
    assert_eq!(decimal_text(100.0).as_deref(), Some("100"));
    assert_eq!(decimal_text(-0.25).as_deref(), Some("-0.25"));
    assert_eq!(decimal_text(f64::NAN), None);
    assert_eq!(decimal_text(f64::INFINITY), None);
}
