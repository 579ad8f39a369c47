//! Build outcome reporting.

use std::fmt;
use std::path::PathBuf;

use super::BuildStage;
use crate::asset::{AssetKind, Manifest};
use crate::utils::savings_percent;

/// A degraded or partial outcome that did not stop the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// Minifier failed; the bundle was emitted unminified.
    MinifyFallback { key: String, reason: String },
    /// The bundle failed and has no manifest entry.
    AssetSkipped { key: String, reason: String },
    /// None of the declared files exist; the bundle has no manifest entry.
    EmptyBundle { key: String },
}

impl BuildWarning {
    pub fn key(&self) -> &str {
        match self {
            Self::MinifyFallback { key, .. }
            | Self::AssetSkipped { key, .. }
            | Self::EmptyBundle { key } => key,
        }
    }
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinifyFallback { key, reason } => {
                write!(f, "{key}: minification failed, emitted unminified ({reason})")
            }
            Self::AssetSkipped { key, reason } => write!(f, "{key}: skipped ({reason})"),
            Self::EmptyBundle { key } => write!(f, "{key}: no source files found, skipped"),
        }
    }
}

/// One emitted bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSummary {
    pub kind: AssetKind,
    pub key: String,
    /// Path recorded in the manifest.
    pub emitted: String,
    /// Origins of the combined files, in order.
    pub included: Vec<String>,
    /// Declared files that were not found.
    pub skipped: Vec<PathBuf>,
    /// Combined size before minification.
    pub raw_bytes: usize,
    /// Size of the written file.
    pub output_bytes: usize,
    pub minified: bool,
}

impl AssetSummary {
    pub fn savings_percent(&self) -> f64 {
        savings_percent(self.raw_bytes, self.output_bytes)
    }
}

/// Everything a finished build produced.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub manifest: Manifest,
    pub assets: Vec<AssetSummary>,
    pub warnings: Vec<BuildWarning>,
    pub stage: BuildStage,
}

impl BuildReport {
    pub fn raw_bytes(&self) -> usize {
        self.assets.iter().map(|a| a.raw_bytes).sum()
    }

    pub fn output_bytes(&self) -> usize {
        self.assets.iter().map(|a| a.output_bytes).sum()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn asset(&self, key: &str) -> Option<&AssetSummary> {
        self.assets.iter().find(|a| a.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(key: &str, raw: usize, out: usize) -> AssetSummary {
        AssetSummary {
            kind: AssetKind::Css,
            key: key.into(),
            emitted: format!("dist/{key}"),
            included: vec![],
            skipped: vec![],
            raw_bytes: raw,
            output_bytes: out,
            minified: raw != out,
        }
    }

    #[test]
    fn test_totals() {
        let report = BuildReport {
            manifest: Manifest::new(),
            assets: vec![summary("a.css", 100, 40), summary("b.js", 50, 50)],
            warnings: vec![],
            stage: BuildStage::Done,
        };
        assert_eq!(report.raw_bytes(), 150);
        assert_eq!(report.output_bytes(), 90);
        assert_eq!(report.asset("a.css").unwrap().savings_percent(), 60.0);
        assert!(report.asset("c.css").is_none());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_warning_display() {
        let warning = BuildWarning::EmptyBundle {
            key: "js/main.js".into(),
        };
        assert_eq!(warning.key(), "js/main.js");
        assert_eq!(warning.to_string(), "js/main.js: no source files found, skipped");
    }
}
