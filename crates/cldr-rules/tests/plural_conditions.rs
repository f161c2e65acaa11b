//! Integration tests for plural condition parsing and evaluation.

use cldr_rules::plural::{Condition, Expr, RangeItem, RangeList};
use cldr_rules::{CompileError, Operand, PluralOperands, compile_plural_condition};

fn matches(condition: &str, input: &str) -> bool {
    let condition = compile_plural_condition(condition).unwrap();
    condition.matches(&PluralOperands::parse(input).unwrap())
}

const SAMPLES: [&str; 22] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "11", "12", "14", "21", "100", "101", "105", "111",
    "1.5", "0.0", "1.0", "2.30", "3.5", "1000000",
];

// =============================================================================
// Relations
// =============================================================================

#[test]
fn test_is_and_is_not() {
    let c = "n is 4 or n is not 6";
    assert!(matches(c, "4"));
    assert!(matches(c, "7"));
    assert!(!matches(c, "6"));
}

#[test]
fn test_within_matches_reals() {
    let c = "n within 2..4, 4..6";
    for input in ["2", "3", "4", "5", "6", "2.5", "5.99"] {
        assert!(matches(c, input), "{input}");
    }
    assert!(!matches(c, "1"));
    assert!(!matches(c, "6.5"));
}

#[test]
fn test_in_matches_only_integers() {
    let c = "n in 2..4, 4..6";
    for input in ["2", "3", "4", "5", "6", "4.0"] {
        assert!(matches(c, input), "{input}");
    }
    assert!(!matches(c, "2.5"));
    assert!(!matches(c, "7"));
}

#[test]
fn test_mod_in_range() {
    let c = "n mod 100 in 11..99";
    assert!(matches(c, "111"));
    assert!(!matches(c, "105"));
}

#[test]
fn test_modern_symbols() {
    let c = "n % 10 = 1 and n % 100 != 11";
    assert!(matches(c, "1"));
    assert!(matches(c, "21"));
    assert!(!matches(c, "11"));
    assert!(!matches(c, "111"));
}

#[test]
fn test_not_within() {
    assert!(matches("n not within 1..2", "3"));
    assert!(!matches("n not within 1..2", "1.5"));
    assert!(matches("n not in 1..2", "1.5"));
}

#[test]
fn test_negation_and_parentheses() {
    let c = "not (n = 1 or n = 2) and v = 0";
    assert!(matches(c, "3"));
    assert!(!matches(c, "1"));
    assert!(!matches(c, "3.5"));
}

#[test]
fn test_and_binds_tighter_than_or() {
    let c = "n = 1 or n = 2 and v = 1";
    assert!(matches(c, "1"));
    assert!(!matches(c, "2"));
    assert!(matches(c, "2.0"));
}

#[test]
fn test_sample_annotations_ignored() {
    assert!(matches("i = 1 and v = 0 @integer 1 @decimal 1.0", "1"));
}

// =============================================================================
// AST shape
// =============================================================================

#[test]
fn test_ast_for_modern_relation() {
    let c = compile_plural_condition("i % 10 = 2..4, 7").unwrap();
    assert_eq!(
        c,
        Condition::In(
            Expr::Mod(
                Box::new(Expr::Operand(Operand::I)),
                Box::new(Expr::Literal(10))
            ),
            RangeList(vec![RangeItem::Range(2, 4), RangeItem::Number(7)])
        )
    );
}

#[test]
fn test_operands_read() {
    let c = compile_plural_condition("v = 0 and i % 10 = 1 or f = 1").unwrap();
    let read: Vec<Operand> = c.operands().iter().collect();
    assert_eq!(read, vec![Operand::I, Operand::V, Operand::F]);
}

// =============================================================================
// Pretty printing
// =============================================================================

#[test]
fn test_display_normalizes_keywords() {
    let c = compile_plural_condition("n % 10 = 1 and n % 100 != 11").unwrap();
    insta::assert_snapshot!(c.to_string(), @"n mod 10 in 1 and n mod 100 not in 11");
}

#[test]
fn test_display_parenthesizes_or_under_and() {
    let c = compile_plural_condition("(n = 1 or n = 2) and v = 0").unwrap();
    insta::assert_snapshot!(c.to_string(), @"(n in 1 or n in 2) and v in 0");
}

#[test]
fn test_display_reparse_is_stable() {
    let conditions = [
        "n is 1",
        "n is not 1",
        "i = 1 and v = 0",
        "n % 10 = 1 and n % 100 != 11",
        "v = 0 and i % 10 = 2..4 and i % 100 != 12..14",
        "v = 0 and i % 10 = 0 or v = 0 and i % 10 = 5..9 or v = 0 and i % 100 = 11..14",
        "n within 2..4, 4..6",
        "n mod 100 not within 11..19",
        "not (n = 1 or n = 2)",
        "(n = 1 or n = 2) and v = 0",
        "n = 1 and (v = 0 and i = 1)",
        "e = 0 and i != 0 and i % 1000000 = 0 and v = 0 or e != 0..5",
    ];

    for text in conditions {
        let original = compile_plural_condition(text).unwrap();
        let printed = original.to_string();
        let reparsed = compile_plural_condition(&printed)
            .unwrap_or_else(|e| panic!("'{printed}' did not reparse: {e}"));
        assert_eq!(reparsed.to_string(), printed, "printing is not idempotent");

        for sample in SAMPLES {
            let ops = PluralOperands::parse(sample).unwrap();
            assert_eq!(
                original.matches(&ops),
                reparsed.matches(&ops),
                "'{text}' and '{printed}' disagree on {sample}"
            );
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_missing_right_hand_side() {
    let err = compile_plural_condition("n is").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"plural rule syntax error at column 5 in 'n is': malformed condition (near 'end of input')"
    );
}

#[test]
fn test_unknown_operand_points_at_word() {
    let err = compile_plural_condition("n = 1 or x = 2").unwrap_err();
    match err {
        CompileError::PluralRuleSyntax {
            offending, column, ..
        } => {
            assert_eq!(offending, "x = 2");
            assert_eq!(column, 10);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_trailing_input() {
    let err = compile_plural_condition("n = 1 foo").unwrap_err();
    match err {
        CompileError::PluralRuleSyntax {
            offending,
            column,
            message,
            ..
        } => {
            assert_eq!(offending, "foo");
            assert_eq!(column, 7);
            assert_eq!(message, "unexpected input");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_malformed_conditions() {
    for text in [
        "",
        "@integer 1",
        "n = ",
        "n = 1..",
        "n = 1 and",
        "(n = 1",
        "n 1",
        "n = 1,",
        "nn = 1",
        "n == 1",
    ] {
        assert!(
            matches!(
                compile_plural_condition(text),
                Err(CompileError::PluralRuleSyntax { .. })
            ),
            "accepted {text:?}"
        );
    }
}
