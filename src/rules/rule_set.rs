//! The rule trait and the ordered rule set.

use super::builtin;
use super::types::{Evaluation, Finding, Severity, Violation};
use crate::config::{HookConfig, RuleSetting};
use crate::error::Result;
use crate::metadata::PackageMetadata;
use tracing::debug;

/// A single independent check over the metadata record.
pub trait Rule {
    /// Stable identifier used in reports and configuration.
    fn id(&self) -> &'static str;

    /// One-line description for `--list-rules`.
    fn description(&self) -> &'static str;

    /// Severity used when the configuration does not override it.
    fn default_severity(&self) -> Severity;

    /// Inspect the record and return every violation found.
    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation>;
}

struct RuleEntry {
    rule: Box<dyn Rule>,
    severity: Severity,
    enabled: bool,
}

/// Ordered sequence of rules with their effective severities.
#[derive(Default)]
pub struct RuleSet {
    entries: Vec<RuleEntry>,
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (e.rule.id(), e.severity, e.enabled)))
            .finish()
    }
}

impl RuleSet {
    /// An empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule, applying a configured severity override and enable flag.
    pub fn push(&mut self, rule: Box<dyn Rule>, setting: &RuleSetting) {
        let severity = setting.severity.unwrap_or_else(|| rule.default_severity());
        self.entries.push(RuleEntry {
            rule,
            severity,
            enabled: setting.enabled,
        });
    }

    /// Build the built-in rule set and apply the configured overrides.
    ///
    /// # Returns
    ///
    /// * `Ok(RuleSet)` - Rules in built-in order
    /// * `Err(HookError::Config)` - A configured glob does not compile
    pub fn from_config(config: &HookConfig) -> Result<Self> {
        let mut set = Self::new();

        for rule in builtin::builtin_rules(config)? {
            let setting = config.rule_setting(rule.id());
            set.push(rule, &setting);
        }

        Ok(set)
    }

    /// Run every enabled rule, in order, against `pkg`.
    pub fn evaluate(&self, pkg: &PackageMetadata) -> Evaluation {
        let mut evaluation = Evaluation::default();

        for entry in self.entries.iter().filter(|e| e.enabled) {
            let violations = entry.rule.check(pkg);
            debug!(
                rule = entry.rule.id(),
                violations = violations.len(),
                "rule evaluated"
            );

            evaluation
                .findings
                .extend(violations.into_iter().map(|v| Finding {
                    rule: entry.rule.id(),
                    severity: entry.severity,
                    field: v.field,
                    message: v.message,
                }));
        }

        evaluation
    }

    /// Rules with their effective severity and enabled flag, in order.
    pub fn rules(&self) -> impl Iterator<Item = (&dyn Rule, Severity, bool)> + '_ {
        self.entries
            .iter()
            .map(|e| (e.rule.as_ref(), e.severity, e.enabled))
    }
}
