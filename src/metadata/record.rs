//! The package metadata record.
//!
//! The record is read from the environment exactly once, at startup, and is
//! then passed by reference to everything downstream. Nothing in the hook
//! looks at the process environment after that point.

use super::dependency::Dependency;
use super::keyword::Keyword;
use super::libs::{NeededLib, ProvidedLib};
use super::vars;
use crate::error::{HookError, Result};
use std::str::FromStr;

/// Metadata describing one package, as supplied by the orchestrator.
///
/// Missing variables are stored as empty strings. Every value is kept
/// verbatim; the typed accessors parse on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMetadata {
    pub repository_id: String,
    pub id: String,
    pub atom: String,
    pub name: String,
    pub version: String,
    pub tag: String,
    pub revision: String,
    pub description: String,
    pub category: String,
    pub chost: String,
    pub cflags: String,
    pub cxxflags: String,
    pub homepage: String,
    pub license: String,
    pub branch: String,
    pub download: String,
    pub keywords: String,
    pub md5: String,
    pub slot: String,
    pub etp_api: String,
    pub date: String,
    pub size: String,
    pub deps: String,
    pub needed_libs: String,
    pub provided_libs: String,
}

impl PackageMetadata {
    /// Read the record from the process environment.
    ///
    /// Values that are not valid UTF-8 are decoded lossily instead of being
    /// dropped.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| {
            std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
        })
    }

    /// Build the record from an arbitrary variable lookup.
    ///
    /// `lookup` is called once per documented variable; `None` reads as empty.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut read = |name: &str| lookup(name).unwrap_or_default();

        Self {
            repository_id: read(vars::REPOSITORY_ID),
            id: read(vars::PKG_ID),
            atom: read(vars::PKG_ATOM),
            name: read(vars::PKG_NAME),
            version: read(vars::PKG_VERSION),
            tag: read(vars::PKG_TAG),
            revision: read(vars::PKG_REVISION),
            description: read(vars::PKG_DESCRIPTION),
            category: read(vars::PKG_CATEGORY),
            chost: read(vars::PKG_CHOST),
            cflags: read(vars::PKG_CFLAGS),
            cxxflags: read(vars::PKG_CXXFLAGS),
            homepage: read(vars::PKG_HOMEPAGE),
            license: read(vars::PKG_LICENSE),
            branch: read(vars::PKG_BRANCH),
            download: read(vars::PKG_DOWNLOAD),
            keywords: read(vars::PKG_KEYWORDS),
            md5: read(vars::PKG_MD5),
            slot: read(vars::PKG_SLOT),
            etp_api: read(vars::PKG_ETPAPI),
            date: read(vars::PKG_DATE),
            size: read(vars::PKG_SIZE),
            deps: read(vars::PKG_DEPS),
            needed_libs: read(vars::PKG_NEEDED_LIBS),
            provided_libs: read(vars::PKG_PROVIDED_LIBS),
        }
    }

    /// Raw value of a documented variable, or `None` for an unknown name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = match name {
            vars::REPOSITORY_ID => &self.repository_id,
            vars::PKG_ID => &self.id,
            vars::PKG_ATOM => &self.atom,
            vars::PKG_NAME => &self.name,
            vars::PKG_VERSION => &self.version,
            vars::PKG_TAG => &self.tag,
            vars::PKG_REVISION => &self.revision,
            vars::PKG_DESCRIPTION => &self.description,
            vars::PKG_CATEGORY => &self.category,
            vars::PKG_CHOST => &self.chost,
            vars::PKG_CFLAGS => &self.cflags,
            vars::PKG_CXXFLAGS => &self.cxxflags,
            vars::PKG_HOMEPAGE => &self.homepage,
            vars::PKG_LICENSE => &self.license,
            vars::PKG_BRANCH => &self.branch,
            vars::PKG_DOWNLOAD => &self.download,
            vars::PKG_KEYWORDS => &self.keywords,
            vars::PKG_MD5 => &self.md5,
            vars::PKG_SLOT => &self.slot,
            vars::PKG_ETPAPI => &self.etp_api,
            vars::PKG_DATE => &self.date,
            vars::PKG_SIZE => &self.size,
            vars::PKG_DEPS => &self.deps,
            vars::PKG_NEEDED_LIBS => &self.needed_libs,
            vars::PKG_PROVIDED_LIBS => &self.provided_libs,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// All documented variables with their values, in report order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        vars::ALL
            .into_iter()
            .map(move |name| (name, self.get(name).unwrap_or_default()))
    }

    /// Dependency specifiers from PKG_DEPS, in original order.
    pub fn dependencies(&self) -> Vec<&str> {
        split_lines(&self.deps)
    }

    /// Each PKG_DEPS entry with its parsed alternatives.
    ///
    /// Entries parse independently, so one malformed entry does not hide
    /// the others. Plain entries yield a single alternative.
    pub fn parsed_dependencies(&self) -> Vec<(&str, Result<Vec<Dependency>>)> {
        self.dependencies()
            .into_iter()
            .map(|entry| (entry, Dependency::parse_alternatives(entry)))
            .collect()
    }

    /// PKG_NEEDED_LIBS parsed into `(soname, elf class)` entries, one result per line.
    pub fn needed_libs(&self) -> Vec<Result<NeededLib>> {
        split_lines(&self.needed_libs)
            .into_iter()
            .map(NeededLib::from_str)
            .collect()
    }

    /// PKG_PROVIDED_LIBS parsed into `(soname, path, elf class)` entries, one result per line.
    pub fn provided_libs(&self) -> Vec<Result<ProvidedLib>> {
        split_lines(&self.provided_libs)
            .into_iter()
            .map(ProvidedLib::from_str)
            .collect()
    }

    /// PKG_KEYWORDS split on whitespace, one result per token.
    pub fn keywords(&self) -> Vec<Result<Keyword>> {
        self.keywords
            .split_whitespace()
            .map(Keyword::from_str)
            .collect()
    }

    /// License names from PKG_LICENSE, without grouping operators.
    pub fn licenses(&self) -> Vec<&str> {
        self.license
            .split_whitespace()
            .filter(|token| !matches!(*token, "(" | ")" | "||") && !token.ends_with('?'))
            .collect()
    }

    /// PKG_ETPAPI as an integer, `None` when unset.
    pub fn etp_api(&self) -> Result<Option<u32>> {
        parse_integer(vars::PKG_ETPAPI, &self.etp_api)
    }

    /// PKG_DATE as a Unix timestamp, `None` when unset.
    pub fn date(&self) -> Result<Option<i64>> {
        parse_integer(vars::PKG_DATE, &self.date)
    }

    /// PKG_SIZE in bytes, `None` when unset.
    pub fn size(&self) -> Result<Option<u64>> {
        parse_integer(vars::PKG_SIZE, &self.size)
    }
}

/// Split a newline-separated list, dropping blank lines.
pub fn split_lines(value: &str) -> Vec<&str> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn parse_integer<T>(field: &'static str, value: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    value.parse::<T>().map(Some).map_err(|e| {
        HookError::invalid_field(field, format!("expected an integer, got '{}' ({})", value, e))
    })
}
