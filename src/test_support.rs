//! Metadata fixtures shared by unit tests.

use crate::metadata::PackageMetadata;

/// Build a metadata record from `(variable, value)` pairs.
///
/// Variables not listed read as unset.
pub(crate) fn metadata_from(pairs: &[(&str, &str)]) -> PackageMetadata {
    PackageMetadata::from_lookup(|name| {
        pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    })
}

/// A fully populated, valid record for a 64-bit package.
pub(crate) fn complete_metadata() -> PackageMetadata {
    metadata_from(&[
        ("REPOSITORY_ID", "sabayonlinux.org"),
        ("PKG_ID", "4242"),
        ("PKG_ATOM", "app-misc/foo-1.0"),
        ("PKG_NAME", "foo"),
        ("PKG_VERSION", "1.0"),
        ("PKG_TAG", ""),
        ("PKG_REVISION", "1"),
        ("PKG_DESCRIPTION", "A test package"),
        ("PKG_CATEGORY", "app-misc"),
        ("PKG_CHOST", "x86_64-pc-linux-gnu"),
        ("PKG_CFLAGS", "-O2 -pipe -march=x86-64"),
        ("PKG_CXXFLAGS", "-O2 -pipe"),
        ("PKG_HOMEPAGE", "https://example.org/foo"),
        ("PKG_LICENSE", "GPL-2"),
        ("PKG_BRANCH", "5"),
        ("PKG_DOWNLOAD", "packages/amd64/5/app-misc:foo-1.0.tbz2"),
        ("PKG_KEYWORDS", "amd64 ~x86"),
        ("PKG_MD5", "d41d8cd98f00b204e9800998ecf8427e"),
        ("PKG_SLOT", "0"),
        ("PKG_ETPAPI", "3"),
        ("PKG_DATE", "1262304000"),
        ("PKG_SIZE", "102400"),
        ("PKG_DEPS", ">=sys-libs/zlib-1.2.3\n!app-misc/foo-legacy"),
        ("PKG_NEEDED_LIBS", "libz.so.1|2\nlibc.so.6|2"),
        ("PKG_PROVIDED_LIBS", "libfoo.so.1|/usr/lib64/libfoo.so.1|2"),
    ])
}
