//! Rules over scalar metadata variables.

use crate::config::HookConfig;
use crate::metadata::dependency::{is_valid_slot, is_valid_tag};
use crate::metadata::{PackageMetadata, atom_string, vars};
use crate::rules::{Rule, Severity, Violation};
use chrono::{DateTime, TimeDelta, Utc};
use regex::Regex;
use std::sync::LazyLock;

static URI_SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:").expect("Invalid URI scheme regex"));

/// Listed variables must be non-empty.
#[derive(Debug, Clone, Default)]
pub struct RequiredFields {
    fields: Vec<&'static str>,
}

impl RequiredFields {
    pub fn new(fields: Vec<&'static str>) -> Self {
        Self { fields }
    }

    /// Fields from `required_fields`; unknown names were rejected by config validation.
    pub fn from_config(config: &HookConfig) -> Self {
        Self::new(
            config
                .required_fields
                .iter()
                .filter_map(|name| vars::lookup(name))
                .collect(),
        )
    }
}

impl Rule for RequiredFields {
    fn id(&self) -> &'static str {
        "required-fields"
    }

    fn description(&self) -> &'static str {
        "configured required variables are non-empty"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation> {
        self.fields
            .iter()
            .copied()
            .filter(|field| pkg.get(field).is_none_or(|v| v.trim().is_empty()))
            .map(|field| Violation::new(field, format!("required field {} is empty", field)))
            .collect()
    }
}

/// PKG_ETPAPI, PKG_DATE and PKG_SIZE are integers when set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericFields;

impl Rule for NumericFields {
    fn id(&self) -> &'static str {
        "numeric-fields"
    }

    fn description(&self) -> &'static str {
        "PKG_ETPAPI, PKG_DATE and PKG_SIZE are non-negative integers"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation> {
        let mut violations = Vec::new();

        if let Err(e) = pkg.etp_api() {
            violations.push(Violation::new(vars::PKG_ETPAPI, e.to_string()));
        }
        match pkg.date() {
            Err(e) => violations.push(Violation::new(vars::PKG_DATE, e.to_string())),
            Ok(Some(ts)) if ts < 0 => violations.push(Violation::new(
                vars::PKG_DATE,
                format!("PKG_DATE {} is before the Unix epoch", ts),
            )),
            Ok(_) => {}
        }
        if let Err(e) = pkg.size() {
            violations.push(Violation::new(vars::PKG_SIZE, e.to_string()));
        }

        violations
    }
}

/// PKG_MD5 is a 32-digit hex string when set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Format;

impl Rule for Md5Format {
    fn id(&self) -> &'static str {
        "md5-format"
    }

    fn description(&self) -> &'static str {
        "PKG_MD5 is a 32-digit hexadecimal checksum"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation> {
        let md5 = pkg.md5.trim();
        if md5.is_empty() {
            return Vec::new();
        }

        if md5.len() == 32 && md5.chars().all(|c| c.is_ascii_hexdigit()) {
            Vec::new()
        } else {
            vec![Violation::new(
                vars::PKG_MD5,
                format!("PKG_MD5 '{}' is not a 32-digit hex checksum", md5),
            )]
        }
    }
}

/// PKG_ATOM agrees with category, name, version and tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomConsistency;

impl Rule for AtomConsistency {
    fn id(&self) -> &'static str {
        "atom-consistency"
    }

    fn description(&self) -> &'static str {
        "PKG_ATOM equals PKG_CATEGORY/PKG_NAME-PKG_VERSION[#PKG_TAG]"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation> {
        let parts = [&pkg.atom, &pkg.category, &pkg.name, &pkg.version];
        if parts.iter().any(|p| p.trim().is_empty()) {
            return Vec::new();
        }

        let expected = atom_string(
            pkg.category.trim(),
            pkg.name.trim(),
            pkg.version.trim(),
            pkg.tag.trim(),
        );
        if pkg.atom.trim() == expected {
            Vec::new()
        } else {
            vec![Violation::new(
                vars::PKG_ATOM,
                format!("PKG_ATOM '{}' does not match '{}'", pkg.atom.trim(), expected),
            )]
        }
    }
}

/// Repository, slot, tag and branch use identifier characters only.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierFormat;

impl Rule for IdentifierFormat {
    fn id(&self) -> &'static str {
        "identifier-format"
    }

    fn description(&self) -> &'static str {
        "REPOSITORY_ID, PKG_SLOT, PKG_TAG and PKG_BRANCH are well-formed identifiers"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation> {
        let checks: [(&'static str, &str, fn(&str) -> bool); 4] = [
            (vars::REPOSITORY_ID, pkg.repository_id.as_str(), is_valid_tag),
            (vars::PKG_SLOT, pkg.slot.as_str(), is_valid_slot),
            (vars::PKG_TAG, pkg.tag.as_str(), is_valid_tag),
            (vars::PKG_BRANCH, pkg.branch.as_str(), is_valid_tag),
        ];

        checks
            .into_iter()
            .filter(|&(_, value, valid)| !value.is_empty() && !valid(value))
            .map(|(field, value, _)| {
                Violation::new(field, format!("{} '{}' is not a valid identifier", field, value))
            })
            .collect()
    }
}

/// PKG_DOWNLOAD is a relative path inside the repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadPath;

impl Rule for DownloadPath {
    fn id(&self) -> &'static str {
        "download-path"
    }

    fn description(&self) -> &'static str {
        "PKG_DOWNLOAD is a relative path without '..' segments"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation> {
        let download = pkg.download.trim();
        if download.is_empty() {
            return Vec::new();
        }

        let problem = if URI_SCHEME_REGEX.is_match(download) {
            Some("is a URI")
        } else if download.starts_with('/') {
            Some("is an absolute path")
        } else if download.split('/').any(|segment| segment == "..") {
            Some("escapes the repository with '..'")
        } else {
            None
        };

        problem
            .map(|p| {
                Violation::new(
                    vars::PKG_DOWNLOAD,
                    format!("PKG_DOWNLOAD '{}' {}", download, p),
                )
            })
            .into_iter()
            .collect()
    }
}

/// PKG_DATE is not in the future.
#[derive(Debug, Clone, Copy)]
pub struct BuildDate {
    tolerance: TimeDelta,
}

impl BuildDate {
    pub fn new(tolerance_hours: u32) -> Self {
        Self {
            tolerance: TimeDelta::hours(i64::from(tolerance_hours)),
        }
    }

    fn check_at(&self, pkg: &PackageMetadata, now: DateTime<Utc>) -> Vec<Violation> {
        // Malformed dates are reported by numeric-fields.
        let Ok(Some(ts)) = pkg.date() else {
            return Vec::new();
        };

        let Some(built) = DateTime::<Utc>::from_timestamp(ts, 0) else {
            return vec![Violation::new(
                vars::PKG_DATE,
                format!("PKG_DATE {} is out of range", ts),
            )];
        };

        // A tolerance past chrono's range means no upper bound.
        let Some(latest) = now.checked_add_signed(self.tolerance) else {
            return Vec::new();
        };

        if built > latest {
            vec![Violation::new(
                vars::PKG_DATE,
                format!("PKG_DATE {} lies in the future", built.to_rfc3339()),
            )]
        } else {
            Vec::new()
        }
    }
}

impl Rule for BuildDate {
    fn id(&self) -> &'static str {
        "build-date"
    }

    fn description(&self) -> &'static str {
        "PKG_DATE is not in the future"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation> {
        self.check_at(pkg, Utc::now())
    }
}
