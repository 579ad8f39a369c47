//! Build orchestration.
//!
//! Pipeline phases:
//! - **Clean** - Delete and recreate the output directory (fatal on failure)
//! - **CSS** - Combine, minify, hash, write, record
//! - **JS** - Same pipeline for the script bundle
//! - **Manifest** - Flush the manifest atomically
//! - **Done** - Hand the report back to the caller
//!
//! The builder owns the output directory for the duration of a build.
//! Concurrent builds into the same directory must be prevented by the
//! caller.

mod error;
mod report;
mod stage;

pub use error::BuildError;
pub use report::{AssetSummary, BuildReport, BuildWarning};
pub use stage::BuildStage;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::asset::{AssetError, AssetKind, ContentHasher, Manifest, Minifier, combine};
use crate::config::ProjectConfig;
use crate::{debug, log};

/// One bundle to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleTarget {
    pub kind: AssetKind,
    /// Logical asset key recorded in the manifest.
    pub key: String,
    /// Source files relative to the source directory, in order.
    pub files: Vec<PathBuf>,
}

impl BundleTarget {
    pub fn new(kind: AssetKind, key: impl Into<String>, files: Vec<PathBuf>) -> Self {
        Self {
            kind,
            key: key.into(),
            files,
        }
    }

    /// Filename stem of the key (`css/main.css` → `main`).
    fn stem(&self) -> &str {
        Path::new(&self.key)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.key)
    }

    /// `<stem>.<hash>.<ext>`
    pub fn emitted_name(&self, hash: &str) -> String {
        format!("{}.{hash}.{}", self.stem(), self.kind.ext())
    }
}

/// Combines, minifies, and hashes bundles into an output directory.
#[derive(Debug)]
pub struct AssetBuilder {
    source: PathBuf,
    output: PathBuf,
    url_prefix: String,
    manifest_name: String,
    targets: Vec<BundleTarget>,
    minifier: Minifier,
    hasher: ContentHasher,
}

impl AssetBuilder {
    /// Builder with no bundles, native minification, and 8-char hashes.
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            url_prefix: String::new(),
            manifest_name: "manifest.json".into(),
            targets: Vec::new(),
            minifier: Minifier::native(),
            hasher: ContentHasher::default(),
        }
    }

    /// Builder for a loaded project. Disabled bundles are left out.
    pub fn from_config(config: &ProjectConfig) -> Self {
        let build = &config.build;
        let mut builder = Self::new(&build.source, &build.output)
            .url_prefix(&build.url_prefix)
            .manifest_name(&build.manifest)
            .minifier(Minifier::from_enabled(build.minify))
            .hasher(ContentHasher::new(build.hash_length));

        for spec in config.bundle.specs() {
            if spec.enable {
                let target = BundleTarget::new(spec.kind, spec.key, spec.files.to_vec());
                builder = builder.bundle(target);
            } else {
                debug!("build"; "bundle {} disabled", spec.key);
            }
        }
        builder
    }

    pub fn url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    pub fn manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_name = name.into();
        self
    }

    pub fn minifier(mut self, minifier: Minifier) -> Self {
        self.minifier = minifier;
        self
    }

    pub fn hasher(mut self, hasher: ContentHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Add a bundle. A later bundle of the same kind replaces an earlier one.
    pub fn bundle(mut self, target: BundleTarget) -> Self {
        self.targets.retain(|t| t.kind != target.kind);
        self.targets.push(target);
        self
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output.join(&self.manifest_name)
    }

    /// Run one full build.
    ///
    /// Returns `Err` only when the output directory cannot be prepared or
    /// the manifest cannot be written. Bundle failures become warnings.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let mut stage = BuildStage::Clean;
        self.clean()?;
        debug!("build"; "cleaned {}", self.output.display());

        let mut manifest = Manifest::new();
        let mut assets = Vec::new();
        let mut warnings = Vec::new();

        for kind in AssetKind::ALL {
            stage = Self::advance(stage, BuildStage::built(kind));
            let Some(target) = self.targets.iter().find(|t| t.kind == kind) else {
                continue;
            };

            match self.build_bundle(target, &mut manifest) {
                Ok(BundleOutcome::Emitted { summary, fallback }) => {
                    if let Some(reason) = fallback {
                        warnings.push(BuildWarning::MinifyFallback {
                            key: target.key.clone(),
                            reason,
                        });
                    }
                    assets.push(summary);
                }
                Ok(BundleOutcome::Empty) => warnings.push(BuildWarning::EmptyBundle {
                    key: target.key.clone(),
                }),
                Err(e) => warnings.push(BuildWarning::AssetSkipped {
                    key: target.key.clone(),
                    reason: error_chain(&e),
                }),
            }
        }

        for warning in &warnings {
            log!("warning"; "{}", warning);
        }

        stage = Self::advance(stage, BuildStage::ManifestWritten);
        manifest.flush(&self.manifest_path())?;
        debug!("build"; "manifest: {} entries", manifest.len());

        stage = Self::advance(stage, BuildStage::Done);
        Ok(BuildReport {
            manifest,
            assets,
            warnings,
            stage,
        })
    }

    fn advance(from: BuildStage, to: BuildStage) -> BuildStage {
        debug_assert_eq!(from.next(), Some(to), "build stages must be sequential");
        debug!("stage"; "{} → {}", from, to);
        to
    }

    /// Delete and recreate the output directory.
    fn clean(&self) -> Result<(), BuildError> {
        let err = |e| BuildError::Clean(self.output.clone(), e);
        match fs::remove_dir_all(&self.output) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(err(e)),
        }
        fs::create_dir_all(&self.output).map_err(err)
    }

    /// Combine → minify → hash → write → record.
    fn build_bundle(
        &self,
        target: &BundleTarget,
        manifest: &mut Manifest,
    ) -> Result<BundleOutcome, AssetError> {
        let bundle = combine(&self.source, &target.files, target.kind)?;
        if bundle.is_empty() {
            return Ok(BundleOutcome::Empty);
        }

        let raw_bytes = bundle.len();
        let included = bundle.included.clone();
        let skipped = bundle.skipped.clone();

        let outcome = self.minifier.minify(target.kind, bundle.into_text()?);
        let minified = outcome.is_minified();
        let fallback = outcome.fallback_reason().map(str::to_owned);
        let content = outcome.into_content();

        let hash = self.hasher.fingerprint(&content);
        let name = target.emitted_name(&hash);
        let path = self.output.join(&name);
        fs::write(&path, &content).map_err(|e| AssetError::Write(path, e))?;

        let emitted = self.emitted_path(&name);
        manifest.record(&target.key, &emitted);
        debug!("build"; "{} → {}", target.key, emitted);

        Ok(BundleOutcome::Emitted {
            summary: AssetSummary {
                kind: target.kind,
                key: target.key.clone(),
                emitted,
                included,
                skipped,
                raw_bytes,
                output_bytes: content.len(),
                minified,
            },
            fallback,
        })
    }

    /// `<url_prefix>/<name>`. The prefix is a URL and is kept as written,
    /// minus trailing slashes.
    fn emitted_path(&self, name: &str) -> String {
        let prefix = self.url_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}/{name}")
        }
    }
}

enum BundleOutcome {
    Emitted {
        summary: AssetSummary,
        fallback: Option<String>,
    },
    Empty,
}

/// Error message including its sources, `outer: inner`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
