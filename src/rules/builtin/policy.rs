//! Repository policy rules: keywords, toolchain flags and licenses.

use super::build_globset;
use crate::error::Result;
use crate::metadata::{PackageMetadata, Stability, vars};
use crate::rules::{Rule, Severity, Violation};
use globset::GlobSet;

/// Keywords parse and name an allowed architecture.
#[derive(Debug, Clone, Default)]
pub struct Keywords {
    allowed_arches: Vec<String>,
}

impl Keywords {
    /// An empty `allowed_arches` accepts any architecture.
    pub fn new(allowed_arches: Vec<String>) -> Self {
        Self { allowed_arches }
    }
}

impl Rule for Keywords {
    fn id(&self) -> &'static str {
        "keywords"
    }

    fn description(&self) -> &'static str {
        "PKG_KEYWORDS entries are well-formed and name allowed architectures"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation> {
        let mut violations = Vec::new();

        for keyword in pkg.keywords() {
            let keyword = match keyword {
                Ok(keyword) => keyword,
                Err(e) => {
                    violations.push(Violation::new(vars::PKG_KEYWORDS, e.to_string()));
                    continue;
                }
            };

            if keyword.stability != Stability::DisabledAll
                && !self.allowed_arches.is_empty()
                && !self.allowed_arches.contains(&keyword.arch)
            {
                violations.push(Violation::new(
                    vars::PKG_KEYWORDS,
                    format!(
                        "keyword '{}' names unknown architecture '{}'",
                        keyword, keyword.arch
                    ),
                ));
            }
        }

        violations
    }
}

/// Compiler flags tokenise and avoid forbidden flags.
#[derive(Debug, Clone)]
pub struct ToolchainFlags {
    forbidden: GlobSet,
}

impl ToolchainFlags {
    pub fn new(forbidden: &[String]) -> Result<Self> {
        Ok(Self {
            forbidden: build_globset("forbidden_flags", forbidden)?,
        })
    }
}

impl Rule for ToolchainFlags {
    fn id(&self) -> &'static str {
        "toolchain-flags"
    }

    fn description(&self) -> &'static str {
        "PKG_CFLAGS and PKG_CXXFLAGS parse and contain no forbidden flags"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (field, value) in [
            (vars::PKG_CFLAGS, pkg.cflags.as_str()),
            (vars::PKG_CXXFLAGS, pkg.cxxflags.as_str()),
        ] {
            if value.trim().is_empty() {
                continue;
            }

            let flags = match shell_words::split(value) {
                Ok(flags) => flags,
                Err(e) => {
                    violations.push(Violation::new(
                        field,
                        format!("{} cannot be split into flags: {}", field, e),
                    ));
                    continue;
                }
            };

            for flag in flags.iter().filter(|f| self.forbidden.is_match(f.as_str())) {
                violations.push(Violation::new(
                    field,
                    format!("{} contains forbidden flag '{}'", field, flag),
                ));
            }
        }

        violations
    }
}

/// No license matches a denied pattern.
#[derive(Debug, Clone)]
pub struct LicensePolicy {
    denied: GlobSet,
}

impl LicensePolicy {
    pub fn new(denied: &[String]) -> Result<Self> {
        Ok(Self {
            denied: build_globset("denied_licenses", denied)?,
        })
    }
}

impl Rule for LicensePolicy {
    fn id(&self) -> &'static str {
        "license-policy"
    }

    fn description(&self) -> &'static str {
        "PKG_LICENSE names no denied license"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation> {
        pkg.licenses()
            .into_iter()
            .filter(|license| self.denied.is_match(license))
            .map(|license| {
                Violation::new(
                    vars::PKG_LICENSE,
                    format!("license '{}' is denied by repository policy", license),
                )
            })
            .collect()
    }
}
