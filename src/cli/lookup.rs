//! Lookup command.
//!
//! Prints the emitted path for a logical key, or the key itself when the
//! manifest has no entry for it.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::asset::Manifest;
use crate::{debug, log};

use super::BuildArgs;

pub fn run_lookup(config_name: &Path, key: &str, manifest: Option<&Path>) -> Result<()> {
    let path = match manifest {
        Some(path) => path.to_path_buf(),
        None => default_manifest_path(config_name)?,
    };
    println!("{}", lookup(&path, key)?);
    Ok(())
}

/// Resolve `key` against the manifest at `path`.
pub fn lookup(path: &Path, key: &str) -> Result<String> {
    let manifest = Manifest::load(path)
        .context("cannot read manifest (run `cachebust build` first)")?;
    debug!("lookup"; "{} entries in {}", manifest.len(), path.display());

    if manifest.get(key).is_none() {
        log!("warning"; "'{}' is not in the manifest, using it unchanged", key);
    }
    Ok(manifest.resolve(key).to_string())
}

fn default_manifest_path(config_name: &Path) -> Result<PathBuf> {
    let config = super::build::load_config(config_name, &BuildArgs::default())?;
    Ok(config.build.manifest_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lookup_resolves_and_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        let mut manifest = Manifest::new();
        manifest.record("css/main.css", "dist/main.1a2b3c4d.css");
        manifest.flush(&path).unwrap();

        assert_eq!(lookup(&path, "css/main.css").unwrap(), "dist/main.1a2b3c4d.css");
        assert_eq!(lookup(&path, "js/main.js").unwrap(), "js/main.js");
    }

    #[test]
    fn test_lookup_without_manifest_fails() {
        let dir = TempDir::new().unwrap();
        assert!(lookup(&dir.path().join("manifest.json"), "css/main.css").is_err());
    }
}
