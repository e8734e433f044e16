//! Core types for rule results.

use crate::outcome::Outcome;
use serde::{Deserialize, Serialize};

/// Severity a rule reports its violations with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Non-fatal: the package is still accepted.
    Warning,
    /// Critical: the package is rejected.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single problem reported by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Metadata variable the problem concerns.
    pub field: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A violation tagged with the rule that produced it and its effective severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule: &'static str,
    pub severity: Severity,
    pub field: &'static str,
    pub message: String,
}

/// Result of running a rule set against one package.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    /// Findings in rule order.
    pub findings: Vec<Finding>,
}

impl Evaluation {
    /// Number of findings with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.count(Severity::Warning) > 0
    }

    /// Collapse the findings into the tri-state outcome.
    ///
    /// The message joins the findings of the deciding severity.
    pub fn outcome(&self) -> Outcome {
        if self.has_errors() {
            Outcome::Error(self.summary(Severity::Error))
        } else if self.has_warnings() {
            Outcome::Warning(self.summary(Severity::Warning))
        } else {
            Outcome::Pass
        }
    }

    fn summary(&self, severity: Severity) -> String {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .map(|f| format!("{}: {}", f.rule, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
