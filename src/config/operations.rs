//! Config loading and validation.

use super::model::{HookConfig, RuleSetting};
use crate::error::{HookError, Result};
use crate::metadata::vars;
use crate::rules::RULE_IDS;
use std::path::Path;
use tracing::debug;

impl HookConfig {
    /// Load the config from `path`, or fall back to defaults when no path is given.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                debug!(path = %path.display(), "loading rule configuration");
                Self::load(path)
            }
            None => {
                debug!("no configuration given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(HookConfig)` - Successfully loaded and validated config
    /// * `Err(HookError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            HookError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: HookConfig = serde_yaml::from_str(yaml)
            .map_err(|e| HookError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `required_fields` entries must be documented metadata variables
    /// - `allowed_elf_classes` must be non-empty, with non-empty entries
    /// - `rules` keys must be built-in rule ids
    ///
    /// Glob patterns are checked when the rule set is built.
    pub fn validate(&self) -> Result<()> {
        for field in &self.required_fields {
            if vars::lookup(field).is_none() {
                return Err(HookError::Config(format!(
                    "required_fields entry '{}' is not a known metadata variable",
                    field
                )));
            }
        }

        if self.allowed_elf_classes.is_empty() {
            return Err(HookError::Config(
                "allowed_elf_classes must list at least one ELF class".to_string(),
            ));
        }
        if self.allowed_elf_classes.iter().any(|c| c.trim().is_empty()) {
            return Err(HookError::Config(
                "allowed_elf_classes entries must be non-empty".to_string(),
            ));
        }

        for id in self.rules.keys() {
            if !RULE_IDS.contains(&id.as_str()) {
                return Err(HookError::Config(format!(
                    "unknown rule '{}' in rules (known: {})",
                    id,
                    RULE_IDS.join(", ")
                )));
            }
        }

        Ok(())
    }

    /// Override for `rule_id`, or the default (enabled, default severity).
    pub fn rule_setting(&self, rule_id: &str) -> RuleSetting {
        self.rules.get(rule_id).cloned().unwrap_or_default()
    }
}
