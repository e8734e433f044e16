//! Architecture keywords from PKG_KEYWORDS.
//!
//! PKG_KEYWORDS is a space-separated list such as `amd64 ~x86 -arm -*`.
//! A bare arch is stable, `~` marks it testing, `-` masks it, and `-*`
//! masks every arch not listed otherwise.

use std::fmt;
use std::str::FromStr;

use super::vars;
use crate::error::{HookError, Result};

/// How a package is keyworded on one arch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Testing,
    Disabled,
    /// `-*`: no arch at all.
    DisabledAll,
}

impl Stability {
    fn prefix(self) -> &'static str {
        match self {
            Stability::Stable => "",
            Stability::Testing => "~",
            Stability::Disabled | Stability::DisabledAll => "-",
        }
    }
}

/// One PKG_KEYWORDS token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyword {
    /// Arch name, `*` for `-*`.
    pub arch: String,
    pub stability: Stability,
}

impl FromStr for Keyword {
    type Err = HookError;

    fn from_str(token: &str) -> Result<Self> {
        if token == "-*" {
            return Ok(Keyword {
                arch: "*".to_string(),
                stability: Stability::DisabledAll,
            });
        }

        let (stability, arch) = match token.as_bytes().first() {
            Some(b'~') => (Stability::Testing, &token[1..]),
            Some(b'-') => (Stability::Disabled, &token[1..]),
            Some(_) => (Stability::Stable, token),
            None => return Err(invalid("empty keyword")),
        };

        let well_formed = arch.starts_with(|c: char| c.is_ascii_alphanumeric())
            && arch
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !well_formed {
            return Err(invalid(&format!("malformed keyword '{}'", token)));
        }

        Ok(Keyword {
            arch: arch.to_string(),
            stability,
        })
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stability.prefix(), self.arch)
    }
}

fn invalid(reason: &str) -> HookError {
    HookError::invalid_field(vars::PKG_KEYWORDS, reason)
}
