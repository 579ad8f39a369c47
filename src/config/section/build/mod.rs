//! `[build]` section configuration.
//!
//! Contains build paths, minification, and hashing settings.
//!
//! # Example
//!
//! ```toml
//! [build]
//! source = "static"          # Base directory of source assets (relative to project root)
//! output = "static/dist"     # Output directory, cleaned on every build
//! url_prefix = "dist"        # Prefix of emitted paths recorded in the manifest
//! manifest = "manifest.json" # Manifest filename inside the output directory
//! minify = true              # Minify bundles (lightningcss / oxc)
//! ```

use std::path::{Path, PathBuf};

use macros::Config;
use serde::{Deserialize, Serialize};

use crate::asset::ContentHasher;
use crate::config::ConfigDiagnostics;
use crate::config::util::{path_violation, strip_cur_dir};

/// Build paths and output settings.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "build")]
pub struct BuildConfig {
    /// Base directory of source assets.
    pub source: PathBuf,

    /// Output directory. Deleted and recreated on every build.
    pub output: PathBuf,

    /// Prefix of emitted paths recorded in the manifest.
    pub url_prefix: String,

    /// Manifest filename inside the output directory.
    pub manifest: String,

    /// Minify bundles before hashing.
    pub minify: bool,

    /// Hex chars of the content hash in emitted filenames.
    #[config(status = experimental)]
    pub hash_length: usize,

    /// Allow experimental features without hints.
    pub allow_experimental: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: "static".into(),
            output: "static/dist".into(),
            url_prefix: "dist".into(),
            manifest: "manifest.json".into(),
            minify: true,
            hash_length: ContentHasher::DEFAULT_LEN,
            allow_experimental: false,
        }
    }
}

impl BuildConfig {
    pub const MIN_HASH_LENGTH: usize = 4;

    /// Absolute path of the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.output.join(&self.manifest)
    }

    /// Normalize directories relative to the project root.
    pub fn normalize(&mut self, root: &Path) {
        self.source = crate::utils::path::normalize_path(&root.join(&self.source));
        self.output = crate::utils::path::normalize_path(&root.join(&self.output));
    }

    // ========================================================================
    // Validation (Pre-normalization)
    // ========================================================================

    /// Validate path safety before normalization.
    ///
    /// MUST be called before `normalize()`: afterwards both paths are
    /// absolute and the relative checks cannot be made.
    pub fn validate_paths(&self, diag: &mut ConfigDiagnostics) {
        if let Some(reason) = path_violation(&self.source) {
            diag.error(
                Self::FIELDS.source,
                format!("path '{}': {reason}", self.source.display()),
            );
        }
        if let Some(reason) = path_violation(&self.output) {
            diag.error(
                Self::FIELDS.output,
                format!("path '{}': {reason}", self.output.display()),
            );
            return;
        }

        let source = strip_cur_dir(&self.source);
        let output = strip_cur_dir(&self.output);
        if output.as_os_str().is_empty() {
            diag.error_with_hint(
                Self::FIELDS.output,
                "output is the project root",
                "point output at a dedicated directory such as \"static/dist\"",
            );
        } else if source.starts_with(&output) {
            diag.error_with_hint(
                Self::FIELDS.output,
                format!(
                    "output '{}' contains {} '{}' and would be deleted by clean",
                    self.output.display(),
                    Self::FIELDS.source,
                    self.source.display()
                ),
                "point output at a dedicated directory such as \"static/dist\"",
            );
        }
    }

    // ========================================================================
    // Validation (Post-normalization)
    // ========================================================================

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !(Self::MIN_HASH_LENGTH..=ContentHasher::MAX_LEN).contains(&self.hash_length) {
            diag.error(
                Self::FIELDS.hash_length,
                format!(
                    "{} must be between {} and {}, got {}",
                    Self::FIELDS.hash_length,
                    Self::MIN_HASH_LENGTH,
                    ContentHasher::MAX_LEN,
                    self.hash_length
                ),
            );
        }

        let manifest = Path::new(&self.manifest);
        let is_bare = manifest.components().count() == 1
            && manifest.file_name().is_some_and(|n| n == manifest.as_os_str());
        if !is_bare {
            diag.error(
                Self::FIELDS.manifest,
                format!("'{}' must be a bare filename", self.manifest),
            );
        } else if manifest.extension().and_then(|e| e.to_str()) != Some("json") {
            diag.error(
                Self::FIELDS.manifest,
                format!("'{}' must end in .json", self.manifest),
            );
        }

        if self.url_prefix.contains('\\') || self.url_prefix.chars().any(char::is_whitespace) {
            diag.error_with_hint(
                Self::FIELDS.url_prefix,
                format!("'{}' is not a URL path", self.url_prefix),
                "use forward slashes and no spaces, e.g. \"dist\" or \"/static/dist\"",
            );
        }

        if self.source.exists() && !self.source.is_dir() {
            diag.error(
                Self::FIELDS.source,
                format!("'{}' must be a directory", self.source.display()),
            );
        }
    }
}
