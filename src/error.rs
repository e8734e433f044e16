//! Error types for the QA hook.
//!
//! Uses thiserror for derive macros. Every error is an internal fault from
//! the orchestrator's point of view, so all variants map to the critical
//! exit code.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for hook operations.
#[derive(Error, Debug)]
pub enum HookError {
    /// The rule configuration could not be read, parsed or validated.
    #[error("configuration error: {0}")]
    Config(String),

    /// A metadata variable holds a value that cannot be parsed.
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// The report could not be rendered.
    #[error("failed to write report: {0}")]
    Report(String),
}

impl HookError {
    /// Shorthand for an `InvalidField` error.
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        HookError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            HookError::Config(_) => exit_codes::CRITICAL,
            HookError::InvalidField { .. } => exit_codes::CRITICAL,
            HookError::Report(_) => exit_codes::CRITICAL,
        }
    }
}

/// Result type alias for hook operations.
pub type Result<T> = std::result::Result<T, HookError>;
