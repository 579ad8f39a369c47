//! Build command.

use anyhow::{Context, Result};
use std::path::Path;

use crate::builder::{AssetBuilder, BuildReport};
use crate::config::{ProjectConfig, find_config_file};
use crate::utils::{format_bytes, plural_count};
use crate::{debug, log, logger};

use super::BuildArgs;

/// Locate the config, build every enabled bundle and print a summary.
pub fn run_build(config_name: &Path, args: &BuildArgs) -> Result<BuildReport> {
    logger::set_verbose(args.verbose);

    let config = load_config(config_name, args)?;
    debug!("config"; "loaded {}", config.config_path.display());

    let builder = AssetBuilder::from_config(&config);
    let report = builder.build().with_context(|| {
        format!(
            "build failed in '{}'",
            config.root_relative(&config.build.output).display()
        )
    })?;

    print_summary(&config, &report);
    Ok(report)
}

/// Find the config by walking up from the current directory.
pub(crate) fn load_config(config_name: &Path, args: &BuildArgs) -> Result<ProjectConfig> {
    let cwd = std::env::current_dir().context("cannot read current directory")?;
    let path = find_config_file(config_name, &cwd).with_context(|| {
        format!(
            "'{}' not found in '{}' or any parent directory (run `cachebust init`)",
            config_name.display(),
            cwd.display()
        )
    })?;
    ProjectConfig::load(&path, &args.overrides())
}

fn print_summary(config: &ProjectConfig, report: &BuildReport) {
    for asset in &report.assets {
        let size = if asset.minified {
            format!(
                "{} → {}, -{:.1}%",
                format_bytes(asset.raw_bytes),
                format_bytes(asset.output_bytes),
                asset.savings_percent()
            )
        } else {
            format_bytes(asset.output_bytes)
        };
        log!(asset.kind.ext(); "{} → {} ({})", asset.key, asset.emitted, size);

        for skipped in &asset.skipped {
            debug!(asset.kind.ext(); "not found: {}", skipped.display());
        }
    }

    log!("done"; "{}", done_line(config, report));
}

/// Asset count, manifest location, total bytes before and after.
fn done_line(config: &ProjectConfig, report: &BuildReport) -> String {
    let manifest = config.build.manifest_path();
    let mut line = format!(
        "{} in {}, {} → {}",
        plural_count(report.manifest.len(), "asset"),
        config.root_relative(&manifest).display(),
        format_bytes(report.raw_bytes()),
        format_bytes(report.output_bytes())
    );
    if report.has_warnings() {
        line.push_str(&format!(", {}", plural_count(report.warnings.len(), "warning")));
    }
    line
}
