//! Cross-checks compiled CLDR rule text against ICU4X's plural data.

use cldr_rules::{PluralRuleSet, compile_plural_rule_set};
use icu_locale_core::{Locale, locale};
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

fn assert_parity(
    locale: Locale,
    kind: PluralRuleType,
    rules: &PluralRuleSet,
    inputs: impl IntoIterator<Item = i64>,
) {
    let icu = PluralRules::try_new(locale.clone().into(), kind.into()).unwrap();
    for n in inputs {
        assert_eq!(
            rules.select(n).unwrap(),
            category_str(icu.category_for(n)),
            "{locale} {kind:?} disagrees on {n}"
        );
    }
}

#[test]
fn test_english_cardinal() {
    let rules = compile_plural_rule_set([
        ("one", "i = 1 and v = 0 @integer 1"),
        ("other", " @integer 0, 2~16, 100, 1000"),
    ])
    .unwrap();
    assert_parity(locale!("en"), PluralRuleType::Cardinal, &rules, 0..=1000);
}

#[test]
fn test_english_ordinal() {
    let rules = compile_plural_rule_set([
        ("one", "n % 10 = 1 and n % 100 != 11"),
        ("two", "n % 10 = 2 and n % 100 != 12"),
        ("few", "n % 10 = 3 and n % 100 != 13"),
    ])
    .unwrap();
    assert_parity(locale!("en"), PluralRuleType::Ordinal, &rules, 0..=1000);
}

#[test]
fn test_russian_cardinal() {
    let rules = compile_plural_rule_set([
        ("one", "v = 0 and i % 10 = 1 and i % 100 != 11"),
        ("few", "v = 0 and i % 10 = 2..4 and i % 100 != 12..14"),
        (
            "many",
            "v = 0 and i % 10 = 0 or v = 0 and i % 10 = 5..9 or v = 0 and i % 100 = 11..14",
        ),
    ])
    .unwrap();
    assert_parity(locale!("ru"), PluralRuleType::Cardinal, &rules, 0..=1000);
}

#[test]
fn test_arabic_cardinal() {
    let rules = compile_plural_rule_set([
        ("zero", "n = 0"),
        ("one", "n = 1"),
        ("two", "n = 2"),
        ("few", "n % 100 = 3..10"),
        ("many", "n % 100 = 11..99"),
    ])
    .unwrap();
    assert_parity(locale!("ar"), PluralRuleType::Cardinal, &rules, 0..=1000);
}

#[test]
fn test_french_cardinal_with_exponent_rule() {
    let rules = compile_plural_rule_set([
        ("one", "i = 0,1"),
        (
            "many",
            "e = 0 and i != 0 and i % 1000000 = 0 and v = 0 or e != 0..5",
        ),
    ])
    .unwrap();
    let inputs = (0..=200).chain([1_000_000, 2_000_000, 1_000_001, 10_000_000]);
    assert_parity(locale!("fr"), PluralRuleType::Cardinal, &rules, inputs);
}
