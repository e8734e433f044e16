//! Rule configuration for the QA hook.
//!
//! This module defines the HookConfig struct that represents the optional
//! YAML file passed with `--config` (or `QA_HOOK_CONFIG`). It supports
//! forward-compatible parsing (unknown fields are ignored), defaults for
//! every key, and validation of config values.

mod model;
mod operations;


// Re-export public API
pub use model::{HookConfig, RuleSetting};
