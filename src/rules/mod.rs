//! Validation rules for package metadata.
//!
//! A [`RuleSet`] is an ordered sequence of independent [`Rule`]s. Each rule
//! inspects the metadata record and reports violations; the rule set tags
//! them with the rule's effective severity (its default, or the configured
//! override). Findings are then collapsed into the tri-state outcome.
//!
//! Built-in rules tolerate empty values: a rule that checks the format of a
//! field says nothing when the field is unset. Presence is checked only by
//! `required-fields`, for the variables the configuration lists.

pub mod builtin;
mod rule_set;
mod types;


// Re-export public API
pub use builtin::RULE_IDS;
pub use rule_set::{Rule, RuleSet};
pub use types::{Evaluation, Finding, Severity, Violation};
