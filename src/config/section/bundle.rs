//! `[bundle.css]` and `[bundle.js]` section configuration.
//!
//! Each bundle combines its `files` (relative to `[build] source`) in the
//! declared order into one emitted file, recorded under `key`.
//!
//! # Example
//!
//! ```toml
//! [bundle.css]
//! key = "css/main.css"
//! files = ["css/base.css", "css/layout.css", "css/print.css"]
//!
//! [bundle.js]
//! enable = false
//! ```

use std::path::{Path, PathBuf};

use macros::Config;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::asset::AssetKind;
use crate::config::util::path_violation;
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BundlesConfig {
    /// Stylesheet bundle.
    pub css: CssBundleConfig,
    /// Script bundle.
    pub js: JsBundleConfig,
}

/// Stylesheet bundle.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "bundle.css")]
pub struct CssBundleConfig {
    /// Build this bundle.
    pub enable: bool,
    /// Logical asset key used by templates.
    pub key: String,
    /// Source files in concatenation order (relative to `build.source`).
    pub files: Vec<PathBuf>,
}

impl Default for CssBundleConfig {
    fn default() -> Self {
        Self {
            enable: true,
            key: "css/main.css".into(),
            files: vec!["css/main.css".into()],
        }
    }
}

/// Script bundle.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "bundle.js")]
pub struct JsBundleConfig {
    /// Build this bundle.
    pub enable: bool,
    /// Logical asset key used by templates.
    pub key: String,
    /// Source files in concatenation order (relative to `build.source`).
    pub files: Vec<PathBuf>,
}

impl Default for JsBundleConfig {
    fn default() -> Self {
        Self {
            enable: true,
            key: "js/main.js".into(),
            files: vec!["js/main.js".into()],
        }
    }
}

/// Kind-independent view of one bundle section.
#[derive(Debug, Clone, Copy)]
pub struct BundleSpec<'a> {
    pub kind: AssetKind,
    pub enable: bool,
    pub key: &'a str,
    pub files: &'a [PathBuf],
    key_field: FieldPath,
    files_field: FieldPath,
}

impl BundleSpec<'_> {
    fn validate_paths(&self, diag: &mut ConfigDiagnostics) {
        let total = self.files.len();
        for (idx, file) in self.files.iter().enumerate() {
            if let Some(reason) = path_violation(file) {
                // Only show index if there are multiple entries
                let prefix = if total > 1 {
                    format!("[{idx}] ")
                } else {
                    String::new()
                };
                diag.error(
                    self.files_field,
                    format!("{prefix}path '{}': {reason}", file.display()),
                );
            }
        }
    }

    fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }

        if self.key.trim().is_empty() {
            diag.error(self.key_field, "key must not be empty");
        } else if AssetKind::from_path(Path::new(self.key)) != Some(self.kind) {
            diag.error(
                self.key_field,
                format!("key '{}' must end in .{}", self.key, self.kind.ext()),
            );
        }

        if self.files.is_empty() {
            diag.error_with_hint(
                self.files_field,
                "no source files listed",
                format!("list at least one .{} file or set enable = false", self.kind.ext()),
            );
        }

        let mut seen = FxHashSet::default();
        for (idx, file) in self.files.iter().enumerate() {
            if !seen.insert(file) {
                diag.error(
                    self.files_field,
                    format!("[{idx}] '{}' is listed more than once", file.display()),
                );
            }
        }
    }
}

impl BundlesConfig {
    /// Bundles in build order: CSS, then JS.
    pub fn specs(&self) -> [BundleSpec<'_>; 2] {
        [
            BundleSpec {
                kind: AssetKind::Css,
                enable: self.css.enable,
                key: &self.css.key,
                files: &self.css.files,
                key_field: CssBundleConfig::FIELDS.key,
                files_field: CssBundleConfig::FIELDS.files,
            },
            BundleSpec {
                kind: AssetKind::Js,
                enable: self.js.enable,
                key: &self.js.key,
                files: &self.js.files,
                key_field: JsBundleConfig::FIELDS.key,
                files_field: JsBundleConfig::FIELDS.files,
            },
        ]
    }

    /// Check file paths stay inside the source directory.
    pub fn validate_paths(&self, diag: &mut ConfigDiagnostics) {
        for spec in self.specs() {
            spec.validate_paths(diag);
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for spec in self.specs() {
            spec.validate(diag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn diagnostics(extra: &str) -> ConfigDiagnostics {
        let config = test_parse_config(extra);
        let mut diag = ConfigDiagnostics::new();
        config.bundle.validate_paths(&mut diag);
        config.bundle.validate(&mut diag);
        diag
    }

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        let [css, js] = config.bundle.specs();
        assert_eq!(css.kind, AssetKind::Css);
        assert_eq!(css.key, "css/main.css");
        assert_eq!(css.files, [PathBuf::from("css/main.css")]);
        assert_eq!(js.key, "js/main.js");
        assert!(css.enable && js.enable);
        assert!(diagnostics("").is_empty());
    }

    #[test]
    fn test_declared_order_is_kept() {
        let config = test_parse_config(
            r#"
[bundle.css]
files = ["css/variables.css", "css/base.css", "css/components.css"]
"#,
        );
        assert_eq!(
            config.bundle.css.files,
            vec![
                PathBuf::from("css/variables.css"),
                PathBuf::from("css/base.css"),
                PathBuf::from("css/components.css"),
            ]
        );
    }

    #[test]
    fn test_key_must_match_kind() {
        let diag = diagnostics("[bundle.css]\nkey = \"css/main.js\"");
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field.as_str(), "bundle.css.key");

        let diag = diagnostics("[bundle.js]\nkey = \"  \"");
        assert_eq!(diag.errors()[0].message, "key must not be empty");
    }

    #[test]
    fn test_files_checks() {
        let diag = diagnostics("[bundle.css]\nfiles = [\"a.css\", \"../b.css\", \"a.css\"]");
        assert_eq!(diag.len(), 2);
        assert!(diag.errors()[0].message.starts_with("[1] path '../b.css'"));
        assert!(diag.errors()[1].message.contains("more than once"));

        let diag = diagnostics("[bundle.js]\nfiles = []");
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field.as_str(), "bundle.js.files");
    }

    #[test]
    fn test_disabled_bundle_skips_checks() {
        let diag = diagnostics("[bundle.js]\nenable = false\nfiles = []");
        assert!(diag.is_empty());
    }
}
