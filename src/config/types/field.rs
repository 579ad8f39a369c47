//! Type-safe config field path.

use owo_colors::Style;
use std::fmt;

/// A type-safe wrapper for config field paths.
///
/// Used with `#[derive(Config)]` to generate compile-time checked
/// field path accessors.
///
/// # Example
///
/// ```ignore
/// #[derive(Config)]
/// #[config(section = "build")]
/// pub struct BuildConfig {
///     pub source: PathBuf,
/// }
///
/// // Generated:
/// impl BuildConfig {
///     pub const FIELDS: BuildConfigFields = ...;
/// }
///
/// // Usage:
/// diag.error(BuildConfig::FIELDS.source, "must be relative");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted = format!("`{}`", self.0);
        f.write_str(&crate::logger::paint(quoted, Style::new().bright_blue()))
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}
