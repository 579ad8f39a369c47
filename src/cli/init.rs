//! Project initialization.
//!
//! Writes a commented `cachebust.toml`, empty starter bundles under the
//! source directory, and ignore files for the output directory.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

use crate::config::{BuildConfig, CssBundleConfig, JsBundleConfig};
use crate::log;

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Generate cachebust.toml content with comments
pub fn generate_config_template() -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "# cachebust configuration file (v{})\n\n",
        env!("CARGO_PKG_VERSION")
    ));

    out.push_str(&BuildConfig::template_with_header());
    out.push('\n');
    out.push_str(&CssBundleConfig::template_with_header());
    out.push('\n');
    out.push_str(&JsBundleConfig::template_with_header());

    out
}

/// Initialize a project in `root`.
///
/// Refuses to overwrite an existing config. Starter files and ignore files
/// are only created when missing.
pub fn init_project(root: &Path, config_name: &Path, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", generate_config_template());
        return Ok(());
    }

    let config_path = root.join(config_name);
    if config_path.exists() {
        bail!("'{}' already exists", config_path.display());
    }

    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create directory '{}'", root.display()))?;
    fs::write(&config_path, generate_config_template())
        .with_context(|| format!("Failed to write config file '{}'", config_path.display()))?;

    let defaults = BuildConfig::default();
    write_starter_files(root, &defaults.source)?;
    write_ignore_files(root, &defaults.output)?;

    log!("init"; "project initialized at {}", root.display());
    Ok(())
}

/// Create the default bundle sources if missing.
fn write_starter_files(root: &Path, source: &Path) -> Result<()> {
    let starters = [
        CssBundleConfig::default().files,
        JsBundleConfig::default().files,
    ];

    for rel in starters.iter().flatten() {
        let path = root.join(source).join(rel);
        if path.exists() {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
        }
        fs::write(&path, "").with_context(|| format!("Failed to write '{}'", path.display()))?;
    }
    Ok(())
}

/// Write .gitignore and .ignore files ignoring the output directory
fn write_ignore_files(root: &Path, output_dir: &Path) -> Result<()> {
    let pattern = format!("/{}/\n", crate::utils::path::to_slash(output_dir));

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        // Don't overwrite user's ignore files
        if !path.exists() {
            fs::write(&path, &pattern)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}
