//! Dependency and conflict specifiers from PKG_DEPS.
//!
//! One specifier reads, left to right:
//!
//! ```text
//! [!][op]category/name[-version[*]][#tag][~revision][:slot][[use,flags]]
//! ```
//!
//! A trailing `?` marks an or-group whose alternatives are separated by `;`
//! (`dev-lang/python:2;dev-lang/python:3?`).

use super::vars;
use crate::error::{HookError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Separator between the alternatives of an or-group.
pub const OR_SEPARATOR: char = ';';

/// Suffix that marks an entry as an or-group.
pub const OR_MARKER: char = '?';

/// Prefix of the package tag component.
pub const TAG_PREFIX: char = '#';

/// Prefix of the entropy revision component.
pub const REVISION_PREFIX: char = '~';

const INVALID_CHARS: [char; 4] = ['(', ')', '|', '@'];

static VERSIONED_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<name>[A-Za-z0-9+_][A-Za-z0-9+_-]*?)-(?P<version>(?:cvs\.)?[0-9]+(?:\.[0-9]+)*[a-z]?(?:_(?:pre|p|beta|alpha|rc)[0-9]*)*(?:-r[0-9]+)?)$",
    )
    .expect("Invalid versioned name regex")
});

static CATEGORY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+_][A-Za-z0-9+_.-]*$").expect("Invalid category regex"));

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+_][A-Za-z0-9+_-]*$").expect("Invalid package name regex"));

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+_.-]+$").expect("Invalid tag regex"));

static SLOT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+_][A-Za-z0-9+_./-]*$").expect("Invalid slot regex"));

/// Version comparison operator in front of a specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    GreaterOrEqual,
    LessOrEqual,
    Equal,
    Less,
    Greater,
    /// Any revision of the given version.
    Approximate,
}

impl Operator {
    /// Textual form of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::GreaterOrEqual => ">=",
            Operator::LessOrEqual => "<=",
            Operator::Equal => "=",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::Approximate => "~",
        }
    }

    /// Strip a leading operator from `input`.
    fn split_prefix(input: &str) -> (Option<Self>, &str) {
        const ORDERED: [Operator; 6] = [
            Operator::GreaterOrEqual,
            Operator::LessOrEqual,
            Operator::Equal,
            Operator::Less,
            Operator::Greater,
            Operator::Approximate,
        ];

        for op in ORDERED {
            if let Some(rest) = input.strip_prefix(op.as_str()) {
                return (Some(op), rest);
            }
        }
        (None, input)
    }
}

/// A parsed dependency or conflict specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// `true` for a conflict (`!` blocker).
    pub conflict: bool,
    pub operator: Option<Operator>,
    pub category: Option<String>,
    pub name: String,
    /// Version, including any `-rN` portage revision. Present iff an
    /// operator is.
    pub version: Option<String>,
    /// Trailing `*` version glob (only with `=`).
    pub glob: bool,
    pub tag: Option<String>,
    /// Entropy revision (`~N`).
    pub revision: Option<u32>,
    pub slot: Option<String>,
    pub use_deps: Vec<String>,
}

impl Dependency {
    /// Parse a single specifier.
    pub fn parse(input: &str) -> Result<Self> {
        let spec = input.trim();
        if spec.is_empty() {
            return Err(invalid(input, "empty dependency"));
        }

        if let Some(c) = spec.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(invalid(spec, &format!("invalid character '{}'", c)));
        }

        let (conflict, rest) = match spec.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, spec),
        };

        let (operator, rest) = Operator::split_prefix(rest);
        let (rest, use_deps) = split_use_deps(spec, rest)?;

        let (rest, slot) = match rest.rsplit_once(':') {
            Some((rest, slot)) => {
                if !SLOT_REGEX.is_match(slot) {
                    return Err(invalid(spec, &format!("invalid slot '{}'", slot)));
                }
                (rest, Some(slot.to_string()))
            }
            None => (rest, None),
        };

        let (rest, revision) = match rest.rsplit_once(REVISION_PREFIX) {
            Some((rest, revision)) => {
                let revision = revision.parse::<u32>().map_err(|_| {
                    invalid(spec, &format!("invalid entropy revision '{}'", revision))
                })?;
                (rest, Some(revision))
            }
            None => (rest, None),
        };

        let (rest, tag) = match rest.rsplit_once(TAG_PREFIX) {
            Some((rest, tag)) => {
                if !TAG_REGEX.is_match(tag) {
                    return Err(invalid(spec, &format!("invalid tag '{}'", tag)));
                }
                (rest, Some(tag.to_string()))
            }
            None => (rest, None),
        };

        let (rest, glob) = match rest.strip_suffix('*') {
            Some(rest) => (rest, true),
            None => (rest, false),
        };
        if glob && operator != Some(Operator::Equal) {
            return Err(invalid(spec, "'*' suffix requires the '=' operator"));
        }

        let (category, package) = match rest.split_once('/') {
            Some((category, package)) => {
                if package.contains('/') {
                    return Err(invalid(spec, "more than one '/' in package key"));
                }
                if !CATEGORY_REGEX.is_match(category) {
                    return Err(invalid(spec, &format!("invalid category '{}'", category)));
                }
                (Some(category.to_string()), package)
            }
            None => (None, rest),
        };

        let (name, version) = if operator.is_some() {
            let caps = VERSIONED_NAME_REGEX
                .captures(package)
                .ok_or_else(|| invalid(spec, "operator given but no valid version found"))?;
            (caps["name"].to_string(), Some(caps["version"].to_string()))
        } else {
            (package.to_string(), None)
        };

        if !NAME_REGEX.is_match(&name) {
            return Err(invalid(spec, &format!("invalid package name '{}'", name)));
        }

        if revision.is_some() && version.is_none() {
            return Err(invalid(spec, "entropy revision given without a version"));
        }

        Ok(Dependency {
            conflict,
            operator,
            category,
            name,
            version,
            glob,
            tag,
            revision,
            slot,
            use_deps,
        })
    }

    /// Parse one PKG_DEPS entry, which may be an or-group.
    pub fn parse_alternatives(entry: &str) -> Result<Vec<Self>> {
        let entry = entry.trim();
        match entry.strip_suffix(OR_MARKER) {
            Some(group) => group.split(OR_SEPARATOR).map(Self::parse).collect(),
            None => Ok(vec![Self::parse(entry)?]),
        }
    }

    /// `category/name`, or just `name` when no category was given.
    pub fn key(&self) -> String {
        match &self.category {
            Some(category) => format!("{}/{}", category, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conflict {
            write!(f, "!")?;
        }
        if let Some(op) = self.operator {
            write!(f, "{}", op.as_str())?;
        }
        write!(f, "{}", self.key())?;
        if let Some(version) = &self.version {
            write!(f, "-{}", version)?;
        }
        if self.glob {
            write!(f, "*")?;
        }
        if let Some(tag) = &self.tag {
            write!(f, "{}{}", TAG_PREFIX, tag)?;
        }
        if let Some(revision) = self.revision {
            write!(f, "{}{}", REVISION_PREFIX, revision)?;
        }
        if let Some(slot) = &self.slot {
            write!(f, ":{}", slot)?;
        }
        if !self.use_deps.is_empty() {
            write!(f, "[{}]", self.use_deps.join(","))?;
        }
        Ok(())
    }
}

/// Canonical atom string for a package: `category/name-version[#tag]`.
pub fn atom_string(category: &str, name: &str, version: &str, tag: &str) -> String {
    let mut atom = format!("{}/{}-{}", category, name, version);
    if !tag.is_empty() {
        atom.push(TAG_PREFIX);
        atom.push_str(tag);
    }
    atom
}

/// Whether `tag` is a well-formed package tag.
pub fn is_valid_tag(tag: &str) -> bool {
    TAG_REGEX.is_match(tag)
}

/// Whether `slot` is a well-formed slot (sub-slots allowed).
pub fn is_valid_slot(slot: &str) -> bool {
    SLOT_REGEX.is_match(slot)
}

/// Split a trailing `[flag,flag]` group off `rest`.
fn split_use_deps<'a>(spec: &str, rest: &'a str) -> Result<(&'a str, Vec<String>)> {
    let Some(open) = rest.find('[') else {
        if rest.contains(']') {
            return Err(invalid(spec, "unmatched ']' in USE dependency"));
        }
        return Ok((rest, Vec::new()));
    };

    let Some(inner) = rest[open + 1..].strip_suffix(']') else {
        return Err(invalid(spec, "USE dependency with no closing bracket"));
    };

    if inner.contains('[') || inner.contains(']') {
        return Err(invalid(spec, "more than one USE dependency group"));
    }

    let mut flags = Vec::new();
    for flag in inner.split(',') {
        let flag = flag.trim();
        if flag.is_empty() {
            return Err(invalid(spec, "empty flag in USE dependency"));
        }
        flags.push(flag.to_string());
    }

    Ok((&rest[..open], flags))
}

fn invalid(spec: &str, reason: &str) -> HookError {
    HookError::invalid_field(vars::PKG_DEPS, format!("'{}': {}", spec, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_key() {
        let dep = Dependency::parse("dev-libs/openssl").unwrap();
        assert!(!dep.conflict);
        assert_eq!(dep.operator, None);
        assert_eq!(dep.category.as_deref(), Some("dev-libs"));
        assert_eq!(dep.name, "openssl");
        assert_eq!(dep.version, None);
        assert_eq!(dep.key(), "dev-libs/openssl");
    }

    #[test]
    fn parse_name_without_category() {
        let dep = Dependency::parse("zlib").unwrap();
        assert_eq!(dep.category, None);
        assert_eq!(dep.key(), "zlib");
    }

    #[test]
    fn parse_versioned_with_slot_and_use() {
        let dep = Dependency::parse(">=dev-lang/python-2.7.18-r1:2.7[ssl,-tk]").unwrap();
        assert_eq!(dep.operator, Some(Operator::GreaterOrEqual));
        assert_eq!(dep.name, "python");
        assert_eq!(dep.version.as_deref(), Some("2.7.18-r1"));
        assert_eq!(dep.slot.as_deref(), Some("2.7"));
        assert_eq!(dep.use_deps, vec!["ssl", "-tk"]);
    }

    #[test]
    fn parse_hyphenated_name() {
        let dep = Dependency::parse("=x11-libs/gtk-engines-2.20.2").unwrap();
        assert_eq!(dep.name, "gtk-engines");
        assert_eq!(dep.version.as_deref(), Some("2.20.2"));
    }

    #[test]
    fn parse_conflict() {
        let dep = Dependency::parse("!<sys-apps/sed-4").unwrap();
        assert!(dep.conflict);
        assert_eq!(dep.operator, Some(Operator::Less));
        assert_eq!(dep.version.as_deref(), Some("4"));
    }

    #[test]
    fn parse_tag_and_entropy_revision() {
        let dep = Dependency::parse("=sys-kernel/linux-sources-2.6.23#2.6.23-sabayon-r1~3").unwrap();
        assert_eq!(dep.tag.as_deref(), Some("2.6.23-sabayon-r1"));
        assert_eq!(dep.revision, Some(3));
        assert_eq!(dep.version.as_deref(), Some("2.6.23"));
    }

    #[test]
    fn parse_approximate_operator_is_not_a_revision() {
        let dep = Dependency::parse("~app-misc/foo-1.0").unwrap();
        assert_eq!(dep.operator, Some(Operator::Approximate));
        assert_eq!(dep.revision, None);
        assert_eq!(dep.version.as_deref(), Some("1.0"));
    }

    #[test]
    fn parse_glob_requires_equal() {
        let dep = Dependency::parse("=dev-libs/glib-2.3*").unwrap();
        assert!(dep.glob);
        assert_eq!(dep.version.as_deref(), Some("2.3"));

        assert!(Dependency::parse(">=dev-libs/glib-2.3*").is_err());
    }

    #[test]
    fn display_round_trips_canonical_form() {
        let input = "!=media-libs/test-3.0_rc1#tag~2:1/2[foo,bar]";
        let dep = Dependency::parse(input).unwrap();
        assert_eq!(dep.to_string(), input);
    }

    #[test]
    fn reject_operator_without_version() {
        let err = Dependency::parse(">=dev-libs/openssl").unwrap_err();
        assert!(err.to_string().contains("no valid version"));
    }

    #[test]
    fn reject_version_without_operator() {
        assert!(Dependency::parse("dev-libs/openssl-1.0.2").is_err());
    }

    #[test]
    fn reject_invalid_characters() {
        let err = Dependency::parse("dev-libs/foo@repo").unwrap_err();
        assert!(err.to_string().contains("invalid character '@'"));
        assert!(Dependency::parse("( dev-libs/foo )").is_err());
    }

    #[test]
    fn reject_bad_use_deps() {
        assert!(Dependency::parse("dev-libs/foo[a,,b]").is_err());
        assert!(Dependency::parse("dev-libs/foo[a").is_err());
        assert!(Dependency::parse("dev-libs/foo[a][b]").is_err());
        assert!(Dependency::parse("dev-libs/foo]").is_err());
    }

    #[test]
    fn reject_bad_category_and_name() {
        assert!(Dependency::parse("-dev/foo").is_err());
        assert!(Dependency::parse("dev-libs/-foo").is_err());
        assert!(Dependency::parse("a/b/c").is_err());
    }

    #[test]
    fn reject_non_ascii_identifiers() {
        assert!(Dependency::parse(">=dév-libs/föo-1.0").is_err());
        assert!(Dependency::parse("dev-libs/föo").is_err());
        assert!(Dependency::parse("dév-libs/foo").is_err());
        assert!(Dependency::parse("dev-libs/foo:släp").is_err());
        assert!(Dependency::parse(">=dev-libs/foo-١.٠").is_err());
        assert!(!is_valid_slot("ü"));
        assert!(is_valid_slot("2/2.30"));
    }

    #[test]
    fn reject_non_numeric_revision() {
        let err = Dependency::parse("=app-misc/foo-1.0~x").unwrap_err();
        assert!(err.to_string().contains("entropy revision"));
    }

    #[test]
    fn or_group_yields_each_alternative() {
        let deps = Dependency::parse_alternatives("dev-lang/python:2;dev-lang/python:3?").unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].slot.as_deref(), Some("2"));
        assert_eq!(deps[1].slot.as_deref(), Some("3"));
    }

    #[test]
    fn or_group_rejects_empty_alternative() {
        assert!(Dependency::parse_alternatives("dev-lang/python;?").is_err());
    }

    #[test]
    fn atom_string_appends_tag() {
        assert_eq!(atom_string("app-misc", "foo", "1.0", ""), "app-misc/foo-1.0");
        assert_eq!(
            atom_string("sys-kernel", "linux", "3.0", "sabayon"),
            "sys-kernel/linux-3.0#sabayon"
        );
    }
}
