//! Built-in rules.
//!
//! - `fields`: presence and format of scalar variables
//! - `deps`: dependency specifiers
//! - `libs`: needed and provided shared libraries
//! - `policy`: keywords, toolchain flags and licenses

mod deps;
mod fields;
mod libs;
mod policy;


pub use deps::{DependencySyntax, SelfDependency};
pub use fields::{
    AtomConsistency, BuildDate, DownloadPath, IdentifierFormat, Md5Format, NumericFields,
    RequiredFields,
};
pub use libs::{LibraryPaths, NeededLibs, ProvidedLibs};
pub use policy::{Keywords, LicensePolicy, ToolchainFlags};

use super::Rule;
use crate::config::HookConfig;
use crate::error::{HookError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Ids of the built-in rules, in evaluation order.
pub const RULE_IDS: [&str; 15] = [
    "required-fields",
    "numeric-fields",
    "md5-format",
    "atom-consistency",
    "identifier-format",
    "keywords",
    "dependency-syntax",
    "self-dependency",
    "needed-libs",
    "provided-libs",
    "library-paths",
    "download-path",
    "toolchain-flags",
    "license-policy",
    "build-date",
];

/// Instantiate every built-in rule from `config`, in [`RULE_IDS`] order.
pub fn builtin_rules(config: &HookConfig) -> Result<Vec<Box<dyn Rule>>> {
    let rules: Vec<Box<dyn Rule>> = vec![
        Box::new(RequiredFields::from_config(config)),
        Box::new(NumericFields),
        Box::new(Md5Format),
        Box::new(AtomConsistency),
        Box::new(IdentifierFormat),
        Box::new(Keywords::new(config.allowed_arches.clone())),
        Box::new(DependencySyntax),
        Box::new(SelfDependency),
        Box::new(NeededLibs::new(config.allowed_elf_classes.clone())),
        Box::new(ProvidedLibs::new(config.allowed_elf_classes.clone())),
        Box::new(LibraryPaths::new(&config.library_paths)?),
        Box::new(DownloadPath),
        Box::new(ToolchainFlags::new(&config.forbidden_flags)?),
        Box::new(LicensePolicy::new(&config.denied_licenses)?),
        Box::new(BuildDate::new(config.future_date_tolerance_hours)),
    ];
    Ok(rules)
}

/// Compile a list of glob patterns from config key `key`.
///
/// Blank patterns are skipped.
fn build_globset(key: &str, patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            continue;
        }
        let glob = Glob::new(pattern).map_err(|e| {
            HookError::Config(format!("invalid glob '{}' in {}: {}", pattern, key, e))
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| HookError::Config(format!("failed to build {} globs: {}", key, e)))
}
