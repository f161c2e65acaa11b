//! Compiles CLDR plural-rule conditions and RBNF spell-out rules into
//! evaluators.
//!
//! Plural rules classify a number into a category such as `"one"` or `"few"`:
//!
//! ```
//! use cldr_rules::compile_plural_rule_set;
//!
//! let ru = compile_plural_rule_set([
//!     ("one", "v = 0 and i % 10 = 1 and i % 100 != 11"),
//!     ("few", "v = 0 and i % 10 = 2..4 and i % 100 != 12..14"),
//!     ("many", "v = 0 and i % 10 = 0 or v = 0 and i % 10 = 5..9 or v = 0 and i % 100 = 11..14"),
//! ])
//! .unwrap();
//! assert_eq!(ru.select(21).unwrap(), "one");
//! assert_eq!(ru.select(23).unwrap(), "few");
//! assert_eq!(ru.select(11).unwrap(), "many");
//! assert_eq!(ru.select(1.5).unwrap(), "other");
//! ```
//!
//! RBNF rule sets turn numbers into words:
//!
//! ```
//! use cldr_rules::{RbnfRegistry, compile_rbnf_rule_set};
//!
//! let mut registry = RbnfRegistry::new();
//! registry.insert(
//!     compile_rbnf_rule_set(
//!         "%spellout-small",
//!         [
//!             ("-x", "minus >>;"),
//!             ("0", "zero;"),
//!             ("1", "one;"),
//!             ("2", "two;"),
//!             ("3", "three;"),
//!         ],
//!     )
//!     .unwrap(),
//! );
//! assert_eq!(registry.format("spellout-small", -3.0).unwrap(), "minus three");
//! ```

mod cache;
mod error;
mod operands;
pub mod plural;
pub mod rbnf;

pub use cache::CompileCache;
pub use error::{CompileError, EvalError, compute_suggestions};
pub use operands::{Operand, OperandSet, PluralOperands, decimal_text};
pub use plural::{PluralRuleSet, compile_plural_condition, compile_plural_rule_set};
pub use rbnf::{RbnfRegistry, RbnfRuleSet, compile_rbnf_rule, compile_rbnf_rule_set};
