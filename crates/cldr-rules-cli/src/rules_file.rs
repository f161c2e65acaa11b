//! JSON rules files: one locale's plural rules and RBNF rule sets.
//!
//! ```json
//! {
//!   "default_rule_set": "spellout-numbering",
//!   "plurals": { "cardinal": [["one", "i = 1 and v = 0"]], "ordinal": [] },
//!   "rule_sets": { "spellout-numbering": [["0", "=%spellout-cardinal=;"]] }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::io;
use std::path::{Path, PathBuf};

use cldr_rules::plural::PluralRuleType;
use cldr_rules::rbnf::{DEFAULT_RULE_SET, RuleSetOptions};
use cldr_rules::{CompileCache, CompileError, PluralRuleSet, RbnfRegistry, RbnfRuleSet};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

/// Errors that occur while reading a rules file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}:{line}:{column}: {message}")]
    Json {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
        /// The file text, kept for diagnostics.
        content: String,
    },
}

/// The deserialized contents of a rules file.
#[derive(Debug, Deserialize)]
pub struct RulesFile {
    #[serde(default = "default_rule_set")]
    pub default_rule_set: String,

    /// Ordered `[category, condition]` pairs per plural rule type.
    #[serde(default)]
    pub plurals: BTreeMap<PluralRuleType, Vec<(String, String)>>,

    /// `[key, body]` pairs per rule-set name.
    #[serde(default)]
    pub rule_sets: BTreeMap<String, Vec<(String, String)>>,
}

fn default_rule_set() -> String {
    DEFAULT_RULE_SET.to_string()
}

/// A rules file read from disk.
#[derive(Debug)]
pub struct LoadedRules {
    pub path: PathBuf,
    pub rules: RulesFile,
}

impl LoadedRules {
    pub fn load(path: &Path) -> Result<LoadedRules, LoadError> {
        let content = read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = serde_json::from_str(&content).map_err(|e| LoadError::Json {
            path: path.to_path_buf(),
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
            content: content.clone(),
        })?;
        debug!("loaded rules file {}", path.display());
        Ok(LoadedRules {
            path: path.to_path_buf(),
            rules,
        })
    }
}

impl RulesFile {
    /// Compile the plural rules of one type; an absent type compiles to an
    /// empty rule set.
    pub fn compile_plurals(
        &self,
        kind: PluralRuleType,
        cache: &mut CompileCache,
    ) -> Result<PluralRuleSet, CompileError> {
        let rules = self.plurals.get(&kind).map(Vec::as_slice).unwrap_or_default();
        PluralRuleSet::compile_cached(
            rules.iter().map(|(category, text)| (category.as_str(), text.as_str())),
            cache,
        )
    }

    /// Compile one named rule set.
    pub fn compile_rule_set(
        &self,
        name: &str,
        rules: &[(String, String)],
        cache: &mut CompileCache,
    ) -> Result<RbnfRuleSet, CompileError> {
        let options = RuleSetOptions::builder()
            .default_rule_set(self.default_rule_set.as_str())
            .build();
        RbnfRuleSet::compile_cached(name, rules.iter().cloned(), &options, cache)
    }

    /// Compile everything into a registry, stopping at the first error.
    pub fn registry(&self) -> Result<RbnfRegistry, CompileError> {
        let mut cache = CompileCache::new();
        let mut registry = RbnfRegistry::new();
        for kind in self.plurals.keys() {
            registry = registry.with_plural_rules(*kind, self.compile_plurals(*kind, &mut cache)?);
        }
        for (name, rules) in &self.rule_sets {
            registry.insert(self.compile_rule_set(name, rules, &mut cache)?);
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = r#"{
        "plurals": {
            "cardinal": [["one", "i = 1 and v = 0 @integer 1"]],
            "ordinal": [["one", "n % 10 = 1 and n % 100 != 11"]]
        },
        "rule_sets": {
            "spellout-numbering": [["0", "=%spellout-cardinal=;"]],
            "spellout-cardinal": [["0", "zero;"], ["1", "one;"], ["2", "two;"]]
        }
    }"#;

    #[test]
    fn missing_default_rule_set_uses_spellout_numbering() {
        let rules: RulesFile = serde_json::from_str(RULES).unwrap();
        assert_eq!(rules.default_rule_set, DEFAULT_RULE_SET);
    }

    #[test]
    fn registry_compiles_plurals_and_rule_sets() {
        let rules: RulesFile = serde_json::from_str(RULES).unwrap();
        let registry = rules.registry().unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.plural_rules(PluralRuleType::Ordinal).is_some());
        assert_eq!(registry.format("spellout-numbering", 2.0).unwrap(), "two");
    }

    #[test]
    fn absent_plural_type_compiles_to_other_only() {
        let rules: RulesFile = serde_json::from_str(r#"{ "rule_sets": {} }"#).unwrap();
        let cardinal = rules
            .compile_plurals(PluralRuleType::Cardinal, &mut CompileCache::new())
            .unwrap();
        assert_eq!(cardinal.select(1).unwrap(), "other");
    }

    #[test]
    fn json_error_keeps_position() {
        let path = Path::new("broken.json");
        let err = serde_json::from_str::<RulesFile>("{\n  \"plurals\": [\n}").unwrap_err();
        assert!(err.line() >= 2);
        let err = LoadError::Json {
            path: path.to_path_buf(),
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
            content: String::new(),
        };
        assert!(err.to_string().starts_with("broken.json:"));
    }
}
