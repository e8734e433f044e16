//! Names of the environment variables that carry package metadata.
//!
//! The orchestrator injects these before spawning the hook. [`ALL`] lists
//! them in the order reports print them.

pub const REPOSITORY_ID: &str = "REPOSITORY_ID";
pub const PKG_ID: &str = "PKG_ID";
pub const PKG_ATOM: &str = "PKG_ATOM";
pub const PKG_NAME: &str = "PKG_NAME";
pub const PKG_VERSION: &str = "PKG_VERSION";
pub const PKG_TAG: &str = "PKG_TAG";
pub const PKG_REVISION: &str = "PKG_REVISION";
pub const PKG_DESCRIPTION: &str = "PKG_DESCRIPTION";
pub const PKG_CATEGORY: &str = "PKG_CATEGORY";
pub const PKG_CHOST: &str = "PKG_CHOST";
pub const PKG_CFLAGS: &str = "PKG_CFLAGS";
pub const PKG_CXXFLAGS: &str = "PKG_CXXFLAGS";
pub const PKG_HOMEPAGE: &str = "PKG_HOMEPAGE";
pub const PKG_LICENSE: &str = "PKG_LICENSE";
pub const PKG_BRANCH: &str = "PKG_BRANCH";
pub const PKG_DOWNLOAD: &str = "PKG_DOWNLOAD";
pub const PKG_KEYWORDS: &str = "PKG_KEYWORDS";
pub const PKG_MD5: &str = "PKG_MD5";
pub const PKG_SLOT: &str = "PKG_SLOT";
pub const PKG_ETPAPI: &str = "PKG_ETPAPI";
pub const PKG_DATE: &str = "PKG_DATE";
pub const PKG_SIZE: &str = "PKG_SIZE";
pub const PKG_DEPS: &str = "PKG_DEPS";
pub const PKG_NEEDED_LIBS: &str = "PKG_NEEDED_LIBS";
pub const PKG_PROVIDED_LIBS: &str = "PKG_PROVIDED_LIBS";

/// Every documented metadata variable, in report order.
pub const ALL: [&str; 25] = [
    REPOSITORY_ID,
    PKG_ID,
    PKG_ATOM,
    PKG_NAME,
    PKG_VERSION,
    PKG_TAG,
    PKG_REVISION,
    PKG_DESCRIPTION,
    PKG_CATEGORY,
    PKG_CHOST,
    PKG_CFLAGS,
    PKG_CXXFLAGS,
    PKG_HOMEPAGE,
    PKG_LICENSE,
    PKG_BRANCH,
    PKG_DOWNLOAD,
    PKG_KEYWORDS,
    PKG_MD5,
    PKG_SLOT,
    PKG_ETPAPI,
    PKG_DATE,
    PKG_SIZE,
    PKG_DEPS,
    PKG_NEEDED_LIBS,
    PKG_PROVIDED_LIBS,
];

/// Variables whose value is a newline-separated list.
pub const MULTI_LINE: [&str; 3] = [PKG_DEPS, PKG_NEEDED_LIBS, PKG_PROVIDED_LIBS];

/// Resolve a variable name to its canonical `'static` spelling.
pub fn lookup(name: &str) -> Option<&'static str> {
    ALL.iter().copied().find(|var| *var == name)
}

/// Whether `name` is a newline-separated list variable.
pub fn is_multi_line(name: &str) -> bool {
    MULTI_LINE.contains(&name)
}
