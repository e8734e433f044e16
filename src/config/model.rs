//! Configuration data model.

use crate::rules::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default ELF classes accepted for libraries (32-bit and 64-bit).
pub fn default_allowed_elf_classes() -> Vec<String> {
    vec!["1".to_string(), "2".to_string()]
}

/// Default glob patterns for directories shared libraries may live in.
pub fn default_library_paths() -> Vec<String> {
    vec![
        "/lib*/**".to_string(),
        "/usr/lib*/**".to_string(),
        "/usr/local/lib*/**".to_string(),
        "/opt/**".to_string(),
    ]
}

/// Per-rule override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSetting {
    /// Whether the rule runs at all.
    pub enabled: bool,

    /// Severity to report violations with, instead of the rule's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl Default for RuleSetting {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
        }
    }
}

/// Configuration for the QA hook.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    // =========================================================================
    // Presence
    // =========================================================================
    /// Metadata variables that must be non-empty.
    pub required_fields: Vec<String>,

    // =========================================================================
    // Libraries
    // =========================================================================
    /// ELF classes accepted in PKG_NEEDED_LIBS and PKG_PROVIDED_LIBS.
    #[serde(default = "default_allowed_elf_classes")]
    pub allowed_elf_classes: Vec<String>,

    /// Globs that provided-library paths are expected to match.
    #[serde(default = "default_library_paths")]
    pub library_paths: Vec<String>,

    // =========================================================================
    // Policy
    // =========================================================================
    /// Compiler flags (globs) not allowed in PKG_CFLAGS / PKG_CXXFLAGS.
    pub forbidden_flags: Vec<String>,

    /// License names (globs) that reject a package.
    pub denied_licenses: Vec<String>,

    /// Architectures keywords may name (empty accepts any).
    pub allowed_arches: Vec<String>,

    /// How far in the future PKG_DATE may lie before it is flagged.
    #[serde(default = "default_future_date_tolerance_hours")]
    pub future_date_tolerance_hours: u32,

    // =========================================================================
    // Rule overrides
    // =========================================================================
    /// Per-rule overrides keyed by rule id.
    pub rules: BTreeMap<String, RuleSetting>,
}

fn default_future_date_tolerance_hours() -> u32 {
    24
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            required_fields: Vec::new(),
            allowed_elf_classes: default_allowed_elf_classes(),
            library_paths: default_library_paths(),
            forbidden_flags: Vec::new(),
            denied_licenses: Vec::new(),
            allowed_arches: Vec::new(),
            future_date_tolerance_hours: default_future_date_tolerance_hours(),
            rules: BTreeMap::new(),
        }
    }
}
