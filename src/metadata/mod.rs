//! Package metadata supplied by the QA orchestrator.
//!
//! The orchestrator passes one package per invocation through environment
//! variables. This module reads them into a [`PackageMetadata`] record and
//! provides typed views of the structured fields:
//! - newline-separated lists (dependencies, needed and provided libraries)
//! - space-separated keywords
//! - integer fields (API version, build date, size)

pub mod dependency;
pub mod keyword;
pub mod libs;
mod record;
pub mod vars;


// Re-export public API
pub use dependency::{Dependency, atom_string};
pub use keyword::Stability;
pub use record::{PackageMetadata, split_lines};
