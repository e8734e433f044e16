//! Rules over PKG_NEEDED_LIBS and PKG_PROVIDED_LIBS.

use super::build_globset;
use crate::error::Result;
use crate::metadata::{PackageMetadata, vars};
use crate::rules::{Rule, Severity, Violation};
use globset::GlobSet;

/// Needed libraries parse and use an accepted ELF class.
#[derive(Debug, Clone, Default)]
pub struct NeededLibs {
    allowed_classes: Vec<String>,
}

impl NeededLibs {
    pub fn new(allowed_classes: Vec<String>) -> Self {
        Self { allowed_classes }
    }
}

impl Rule for NeededLibs {
    fn id(&self) -> &'static str {
        "needed-libs"
    }

    fn description(&self) -> &'static str {
        "PKG_NEEDED_LIBS entries are soname|class with an accepted ELF class"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation> {
        let mut violations = Vec::new();

        for lib in pkg.needed_libs() {
            match lib {
                Err(e) => violations.push(Violation::new(vars::PKG_NEEDED_LIBS, e.to_string())),
                Ok(lib) => {
                    if !self.allowed_classes.contains(&lib.elf_class) {
                        violations.push(Violation::new(
                            vars::PKG_NEEDED_LIBS,
                            format!(
                                "needed library {} has unsupported ELF class '{}'",
                                lib.soname, lib.elf_class
                            ),
                        ));
                    }
                }
            }
        }

        violations
    }
}

/// Provided libraries parse, have absolute paths and an accepted ELF class.
#[derive(Debug, Clone, Default)]
pub struct ProvidedLibs {
    allowed_classes: Vec<String>,
}

impl ProvidedLibs {
    pub fn new(allowed_classes: Vec<String>) -> Self {
        Self { allowed_classes }
    }
}

impl Rule for ProvidedLibs {
    fn id(&self) -> &'static str {
        "provided-libs"
    }

    fn description(&self) -> &'static str {
        "PKG_PROVIDED_LIBS entries are soname|path|class with absolute paths"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation> {
        let mut violations = Vec::new();

        for lib in pkg.provided_libs() {
            let lib = match lib {
                Ok(lib) => lib,
                Err(e) => {
                    violations.push(Violation::new(vars::PKG_PROVIDED_LIBS, e.to_string()));
                    continue;
                }
            };

            if !lib.path.starts_with('/') {
                violations.push(Violation::new(
                    vars::PKG_PROVIDED_LIBS,
                    format!(
                        "provided library {} has a relative path '{}'",
                        lib.soname, lib.path
                    ),
                ));
            }
            if !self.allowed_classes.contains(&lib.elf_class) {
                violations.push(Violation::new(
                    vars::PKG_PROVIDED_LIBS,
                    format!(
                        "provided library {} has unsupported ELF class '{}'",
                        lib.soname, lib.elf_class
                    ),
                ));
            }
        }

        violations
    }
}

/// Provided libraries live under the configured library directories.
#[derive(Debug, Clone)]
pub struct LibraryPaths {
    globs: GlobSet,
    patterns: Vec<String>,
}

impl LibraryPaths {
    pub fn new(patterns: &[String]) -> Result<Self> {
        Ok(Self {
            globs: build_globset("library_paths", patterns)?,
            patterns: patterns.to_vec(),
        })
    }
}

impl Rule for LibraryPaths {
    fn id(&self) -> &'static str {
        "library-paths"
    }

    fn description(&self) -> &'static str {
        "provided libraries are installed under a library directory"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation> {
        if self.globs.is_empty() {
            return Vec::new();
        }

        pkg.provided_libs()
            .into_iter()
            .filter_map(|lib| lib.ok())
            .filter(|lib| lib.path.starts_with('/') && !self.globs.is_match(&lib.path))
            .map(|lib| {
                Violation::new(
                    vars::PKG_PROVIDED_LIBS,
                    format!(
                        "provided library {} is installed at '{}', outside {}",
                        lib.soname,
                        lib.path,
                        self.patterns.join(", ")
                    ),
                )
            })
            .collect()
    }
}
