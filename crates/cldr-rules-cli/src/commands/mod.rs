//! CLI command implementations.

mod check;
mod explain;
mod plural;
mod spell;

pub use check::{run_check, CheckArgs};
pub use explain::{run_explain, ExplainArgs};
pub use plural::{run_plural, PluralArgs};
pub use spell::{run_spell, SpellArgs};
