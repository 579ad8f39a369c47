//! Logical asset key → emitted path mapping.
//!
//! The manifest is rebuilt from scratch on every build and written in one
//! piece: content goes to a temp file in the target directory, which is
//! then renamed over the destination, so readers never see a partial file.
//!
//! ```json
//! {
//!   "css/main.css": "dist/main.1a2b3c4d.css",
//!   "js/main.js": "dist/main.5e6f7a8b.js"
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error on manifest `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid manifest `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),
}

/// Keys are sorted so identical builds serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, String>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite an entry, returning the previous path.
    pub fn record(&mut self, key: impl Into<String>, emitted: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), emitted.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Mapped path for `key`, or `key` itself when absent.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json(&self) -> String {
        // A map of strings always serializes
        let mut json = serde_json::to_string_pretty(&self.entries).unwrap_or_default();
        json.push('\n');
        json
    }

    /// Write the whole mapping to `path` atomically.
    pub fn flush(&self, path: &Path) -> Result<(), ManifestError> {
        let io_err = |e| ManifestError::Io(path.to_path_buf(), e);
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(self.to_json().as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(path).map_err(|e| io_err(e.error))?;
        Ok(())
    }

    /// Read a previously flushed manifest.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content =
            fs::read_to_string(path).map_err(|e| ManifestError::Io(path.to_path_buf(), e))?;
        serde_json::from_str(&content).map_err(|e| ManifestError::Json(path.to_path_buf(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_overwrites() {
        let mut manifest = Manifest::new();
        assert_eq!(manifest.record("css/main.css", "dist/main.aaaa.css"), None);
        assert_eq!(
            manifest.record("css/main.css", "dist/main.bbbb.css"),
            Some("dist/main.aaaa.css".into())
        );
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.get("css/main.css"), Some("dist/main.bbbb.css"));
    }

    #[test]
    fn test_resolve_falls_back_to_key() {
        let mut manifest = Manifest::new();
        manifest.record("css/main.css", "dist/main.1234abcd.css");
        assert_eq!(manifest.resolve("css/main.css"), "dist/main.1234abcd.css");
        assert_eq!(manifest.resolve("js/main.js"), "js/main.js");
    }

    #[test]
    fn test_json_is_sorted() {
        let mut manifest = Manifest::new();
        manifest.record("js/main.js", "dist/main.2.js");
        manifest.record("css/main.css", "dist/main.1.css");
        assert_eq!(
            manifest.to_json(),
            "{\n  \"css/main.css\": \"dist/main.1.css\",\n  \"js/main.js\": \"dist/main.2.js\"\n}\n"
        );
    }

    #[test]
    fn test_flush_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");

        let mut manifest = Manifest::new();
        manifest.record("css/main.css", "dist/main.1234abcd.css");
        manifest.flush(&path).unwrap();

        assert_eq!(Manifest::load(&path).unwrap(), manifest);
        // No temp files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_flush_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, "{\"old\": \"entry\"}").unwrap();

        Manifest::new().flush(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn test_flush_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("manifest.json");
        assert!(matches!(Manifest::new().flush(&path), Err(ManifestError::Io(..))));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(Manifest::load(&path), Err(ManifestError::Json(..))));
    }
}
