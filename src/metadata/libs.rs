//! Shared library entries from PKG_NEEDED_LIBS and PKG_PROVIDED_LIBS.

use super::vars;
use crate::error::{HookError, Result};
use std::fmt;
use std::str::FromStr;

/// Separator between the fields of one library entry.
pub const FIELD_SEPARATOR: char = '|';

/// A library the package links against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeededLib {
    /// SONAME of the required library (e.g. `libz.so.1`).
    pub soname: String,
    /// ELF class the package needs the library in.
    pub elf_class: String,
}

/// A library the package ships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvidedLib {
    /// SONAME the library answers to.
    pub soname: String,
    /// Installed path of the library file.
    pub path: String,
    /// ELF class of the library.
    pub elf_class: String,
}

impl FromStr for NeededLib {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self> {
        let fields = split_fields(vars::PKG_NEEDED_LIBS, s, 2)?;
        Ok(NeededLib {
            soname: fields[0].to_string(),
            elf_class: fields[1].to_string(),
        })
    }
}

impl FromStr for ProvidedLib {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self> {
        let fields = split_fields(vars::PKG_PROVIDED_LIBS, s, 3)?;
        Ok(ProvidedLib {
            soname: fields[0].to_string(),
            path: fields[1].to_string(),
            elf_class: fields[2].to_string(),
        })
    }
}

impl fmt::Display for NeededLib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.soname, FIELD_SEPARATOR, self.elf_class)
    }
}

impl fmt::Display for ProvidedLib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.soname,
            self.path,
            self.elf_class,
            sep = FIELD_SEPARATOR
        )
    }
}

/// Split one entry into exactly `expected` trimmed fields.
///
/// The SONAME (first field) and ELF class (last field) must be non-empty.
fn split_fields<'a>(field: &'static str, entry: &'a str, expected: usize) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = entry.split(FIELD_SEPARATOR).map(str::trim).collect();

    if fields.len() != expected {
        return Err(HookError::invalid_field(
            field,
            format!(
                "entry '{}' has {} field(s), expected {}",
                entry,
                fields.len(),
                expected
            ),
        ));
    }

    if fields[0].is_empty() {
        return Err(HookError::invalid_field(
            field,
            format!("entry '{}' has an empty soname", entry),
        ));
    }

    if fields[expected - 1].is_empty() {
        return Err(HookError::invalid_field(
            field,
            format!("entry '{}' has an empty ELF class", entry),
        ));
    }

    Ok(fields)
}
