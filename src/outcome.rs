//! The tri-state validation outcome.
//!
//! Everything inside the hook works with [`Outcome`]; it is turned into a
//! process exit code only in `main`.

use crate::error::HookError;
use crate::exit_codes;

/// Final verdict for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No findings.
    Pass,
    /// Non-fatal findings; the package is accepted.
    Warning(String),
    /// Critical findings or an internal fault; the package is rejected.
    Error(String),
}

impl Outcome {
    /// Exit code reported to the orchestrator.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Pass => exit_codes::PASS,
            Outcome::Warning(_) => exit_codes::WARNING,
            Outcome::Error(_) => exit_codes::CRITICAL,
        }
    }

    /// Short upper-case label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Pass => "PASS",
            Outcome::Warning(_) => "WARNING",
            Outcome::Error(_) => "ERROR",
        }
    }

    /// Summary message, empty for `Pass`.
    pub fn message(&self) -> &str {
        match self {
            Outcome::Pass => "",
            Outcome::Warning(msg) | Outcome::Error(msg) => msg,
        }
    }
}

impl From<HookError> for Outcome {
    fn from(err: HookError) -> Self {
        Outcome::Error(err.to_string())
    }
}
