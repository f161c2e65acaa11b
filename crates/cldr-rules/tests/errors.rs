//! Tests for error types, evaluation failures and suggestion formatting.

use cldr_rules::plural::PluralRuleType;
use cldr_rules::{
    CompileError, EvalError, PluralRuleSet, RbnfRegistry, RbnfRuleSet, compile_plural_rule_set,
    compute_suggestions,
};

#[test]
fn compute_suggestions_finds_similar_names() {
    let available = vec![
        "spellout-cardinal".to_string(),
        "spellout-ordinal".to_string(),
        "digits-ordinal".to_string(),
    ];

    let suggestions = compute_suggestions("spellout-cardnal", &available);
    assert_eq!(suggestions, vec!["spellout-cardinal"]);

    let suggestions = compute_suggestions("numbering", &available);
    assert!(suggestions.is_empty());
}

#[test]
fn compute_suggestions_short_keys_allow_one_edit() {
    let available = vec!["one".to_string(), "two".to_string(), "few".to_string()];
    assert_eq!(compute_suggestions("on", &available), vec!["one"]);
    assert!(compute_suggestions("o", &available).is_empty());
}

#[test]
fn compute_suggestions_limits_to_three() {
    let available: Vec<String> = (0..10).map(|i| format!("set{i}")).collect();
    let suggestions = compute_suggestions("set", &available);
    assert_eq!(suggestions.len(), 3);
}

#[test]
fn unknown_rule_set_reference_surfaces_at_evaluation() {
    let broken = RbnfRuleSet::compile("words", [("0", "=%spellout-cardnal=;")]).unwrap();
    let cardinal = RbnfRuleSet::compile("spellout-cardinal", [("0", "=#,##0=;")]).unwrap();

    let mut registry = RbnfRegistry::new();
    registry.insert(broken);
    registry.insert(cardinal);

    let err = registry.format("words", 3.0).unwrap_err();
    assert_eq!(
        err,
        EvalError::UnknownRuleSetReference {
            name: "spellout-cardnal".to_string(),
            from: "words".to_string(),
            suggestions: vec!["spellout-cardinal".to_string()],
        }
    );
    insta::assert_snapshot!(
        err.to_string(),
        @"unknown rule set '%spellout-cardnal' referenced from 'words' (did you mean: spellout-cardinal?)"
    );

    let unresolved: Vec<(String, String)> = registry.unresolved_references().into_iter().collect();
    assert_eq!(
        unresolved,
        vec![("words".to_string(), "spellout-cardnal".to_string())]
    );
}

#[test]
fn unknown_top_level_rule_set() {
    let registry = RbnfRegistry::new();
    assert!(matches!(
        registry.format("spellout-cardinal", 1.0),
        Err(EvalError::UnknownRuleSetReference { .. })
    ));
}

#[test]
fn no_applicable_rule() {
    let mut registry = RbnfRegistry::new();
    registry.insert(RbnfRuleSet::compile("teens", [("13", "teen;")]).unwrap());

    assert_eq!(
        registry.format("teens", 5.0),
        Err(EvalError::NoApplicableRule {
            rule_set: "teens".to_string(),
            value: "5".to_string(),
        })
    );
    assert_eq!(
        registry.format("teens", -20.0).unwrap_err().to_string(),
        "no rule in rule set 'teens' applies to -20"
    );
}

#[test]
fn plural_selector_without_plural_rules() {
    let mut registry = RbnfRegistry::new();
    registry.insert(
        RbnfRuleSet::compile("items", [("0", "=#,##0= $(cardinal,one{item}other{items})$;")])
            .unwrap(),
    );
    assert_eq!(
        registry.format("items", 2.0),
        Err(EvalError::MissingPluralRules {
            kind: PluralRuleType::Cardinal,
            rule_set: "items".to_string(),
        })
    );

    let cardinal = compile_plural_rule_set([("one", "i = 1 and v = 0")]).unwrap();
    let mut registry = registry_with(cardinal);
    registry.insert(
        RbnfRuleSet::compile("items", [("0", "=#,##0= $(cardinal,one{item}other{items})$;")])
            .unwrap(),
    );
    assert_eq!(registry.format("items", 1.0).unwrap(), "1 item");
    assert_eq!(registry.format("items", 2.0).unwrap(), "2 items");
}

fn registry_with(cardinal: PluralRuleSet) -> RbnfRegistry {
    RbnfRegistry::new().with_plural_rules(PluralRuleType::Cardinal, cardinal)
}

#[test]
fn runaway_recursion_is_bounded() {
    let mut registry = RbnfRegistry::new().with_max_depth(8);
    registry.insert(RbnfRuleSet::compile("loop", [("0", "=%loop=;")]).unwrap());

    match registry.format("loop", 1.0) {
        Err(EvalError::MaxDepthExceeded { chain }) => {
            assert_eq!(chain.len(), 9);
            assert!(chain.iter().all(|name| name == "loop"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn compile_error_root_unwraps_context() {
    let err = RbnfRuleSet::compile("neg", [("-x", "minus <<;")]).unwrap_err();
    assert!(matches!(err, CompileError::InRbnfRule { .. }));
    match err.root() {
        CompileError::RbnfRuleSyntax { rule, offending, .. } => {
            assert_eq!(rule, "minus <<;");
            assert_eq!(offending, "<<");
        }
        other => panic!("unexpected root: {other:?}"),
    }
}
