//! Rules over PKG_DEPS.

use crate::metadata::{PackageMetadata, vars};
use crate::rules::{Rule, Severity, Violation};

/// Every PKG_DEPS entry parses as a dependency specifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencySyntax;

impl Rule for DependencySyntax {
    fn id(&self) -> &'static str {
        "dependency-syntax"
    }

    fn description(&self) -> &'static str {
        "every PKG_DEPS entry is a well-formed dependency or conflict"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation> {
        pkg.parsed_dependencies()
            .into_iter()
            .filter_map(|(_, parsed)| parsed.err())
            .map(|e| Violation::new(vars::PKG_DEPS, e.to_string()))
            .collect()
    }
}

/// The package neither depends on nor blocks itself.
///
/// A slotted blocker for a different slot than PKG_SLOT is allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfDependency;

impl Rule for SelfDependency {
    fn id(&self) -> &'static str {
        "self-dependency"
    }

    fn description(&self) -> &'static str {
        "PKG_DEPS does not name the package itself"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, pkg: &PackageMetadata) -> Vec<Violation> {
        let (category, name) = (pkg.category.trim(), pkg.name.trim());
        if category.is_empty() || name.is_empty() {
            return Vec::new();
        }
        let own_key = format!("{}/{}", category, name);
        let own_slot = pkg.slot.trim();

        let mut violations = Vec::new();
        for (entry, parsed) in pkg.parsed_dependencies() {
            // Syntax errors are reported by dependency-syntax.
            let Ok(alternatives) = parsed else {
                continue;
            };

            for dep in alternatives.iter().filter(|d| d.key() == own_key) {
                if dep.conflict {
                    if dep.slot.as_deref().is_some_and(|slot| slot != own_slot) {
                        continue;
                    }
                    violations.push(Violation::new(
                        vars::PKG_DEPS,
                        format!("package conflicts with itself ('{}')", entry),
                    ));
                } else {
                    violations.push(Violation::new(
                        vars::PKG_DEPS,
                        format!("package depends on itself ('{}')", entry),
                    ));
                }
            }
        }

        violations
    }
}
