//! Exit code constants for the QA hook.
//!
//! The orchestrator reads nothing but the exit status, so only three values
//! are ever returned:
//! - 0: Validation passed
//! - 1: Warning (package still accepted)
//! - 2: Critical error (package rejected, or the hook itself failed)

/// Validation passed with no findings.
pub const PASS: i32 = 0;

/// Validation produced at least one warning and no errors.
pub const WARNING: i32 = 1;

/// Validation found a critical error, or the hook hit an internal fault.
pub const CRITICAL: i32 = 2;

/// Whether `code` is one of the statuses the orchestrator understands.
pub fn is_valid(code: i32) -> bool {
    matches!(code, PASS | WARNING | CRITICAL)
}
