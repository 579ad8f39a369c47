//! Project configuration management for `cachebust.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   └── bundle     # [bundle.css], [bundle.js]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── status     # Field status checks
//! └── mod.rs         # ProjectConfig (this file)
//! ```

pub mod section;
pub mod types;
mod util;

pub use section::{BuildConfig, BundleSpec, BundlesConfig, CssBundleConfig, JsBundleConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};
pub use util::find_config_file;

use crate::log;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config filename
pub const CONFIG_FILE: &str = "cachebust.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing cachebust.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Bundle definitions
    #[serde(default)]
    pub bundle: BundlesConfig,
}

/// Command-line values that override the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub minify: Option<bool>,
}

impl ProjectConfig {
    /// Load, override, normalize, and validate the config at `config_path`.
    ///
    /// The project root is the config file's parent directory.
    pub fn load(config_path: &Path, overrides: &Overrides) -> Result<Self> {
        let mut config = Self::from_path(config_path)?;
        config.apply_overrides(overrides);

        // Validate raw paths before normalization
        config.validate_paths()?;

        let root = config_path
            .parent()
            .map(crate::utils::path::normalize_path)
            .unwrap_or_default();
        config.config_path = crate::utils::path::normalize_path(config_path);
        config.finalize(&root);

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-line overrides.
    fn apply_overrides(&mut self, overrides: &Overrides) {
        Self::update_option(&mut self.build.source, overrides.source.as_ref());
        Self::update_option(&mut self.build.output, overrides.output.as_ref());
        Self::update_option(&mut self.build.minify, overrides.minify.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Set the root and make build directories absolute.
    fn finalize(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        self.build.normalize(root);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Pre-validate paths before normalization.
    ///
    /// Normalization makes every path absolute, after which a user-written
    /// absolute path can no longer be told apart.
    fn validate_paths(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.build.validate_paths(&mut diag);
        self.bundle.validate_paths(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::with_allow_experimental(self.build.allow_experimental);

        if !self.config_path.exists() {
            bail!(ConfigError::Validation("config file not found".into()));
        }

        self.build.validate_field_status(&mut diag);
        self.build.validate(&mut diag);
        self.bundle.validate(&mut diag);

        diag.print_hints();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ProjectConfig {
    let (parsed, ignored) = ProjectConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_project(toml: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("static/css")).unwrap();
        fs::write(dir.path().join(CONFIG_FILE), toml).unwrap();
        dir
    }

    #[test]
    fn test_load_normalizes_paths() {
        let dir = write_project("[build]\nminify = false\n");
        let config = ProjectConfig::load(&dir.path().join(CONFIG_FILE), &Overrides::default())
            .unwrap();

        assert!(config.root.is_absolute());
        assert!(config.build.source.is_absolute());
        assert!(config.build.source.ends_with("static"));
        assert!(config.build.output.ends_with("static/dist"));
        assert_eq!(config.root_relative(&config.build.output), PathBuf::from("static/dist"));
        assert!(!config.build.minify);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let dir = write_project("[build]\nminify = false\n");
        let overrides = Overrides {
            source: Some("assets".into()),
            output: Some("public/assets".into()),
            minify: Some(true),
        };
        let config = ProjectConfig::load(&dir.path().join(CONFIG_FILE), &overrides).unwrap();

        assert!(config.build.source.ends_with("assets"));
        assert!(config.build.output.ends_with("public/assets"));
        assert!(config.build.minify);
    }

    #[test]
    fn test_load_reports_all_errors() {
        let dir = write_project(
            "[build]\nhash_length = 100\nmanifest = \"m.txt\"\n[bundle.css]\nkey = \"\"\n",
        );
        let err = ProjectConfig::load(&dir.path().join(CONFIG_FILE), &Overrides::default())
            .unwrap_err();
        match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::Diagnostics(diag)) => assert_eq!(diag.len(), 3),
            other => panic!("expected diagnostics, got {other:?}"),
        }
    }

    #[test]
    fn test_unsafe_override_is_rejected() {
        let dir = write_project("");
        let overrides = Overrides {
            output: Some("../outside".into()),
            ..Overrides::default()
        };
        assert!(ProjectConfig::load(&dir.path().join(CONFIG_FILE), &overrides).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = ProjectConfig::load(&dir.path().join(CONFIG_FILE), &Overrides::default())
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::Io(..))));
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let (_, ignored) =
            ProjectConfig::parse_with_ignored("[build]\nminfy = true\n[extra]\nx = 1\n").unwrap();
        assert_eq!(ignored, vec!["build.minfy", "extra"]);
    }

    #[test]
    fn test_from_str() {
        let config = ProjectConfig::from_str("[bundle.js]\nfiles = [\"js/a.js\", \"js/b.js\"]")
            .unwrap();
        assert_eq!(config.bundle.js.files.len(), 2);
        assert!(ProjectConfig::from_str("[build\n").is_err());
    }
}
