//! Fatal build errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::asset::ManifestError;

/// Errors that abort a build.
///
/// Failures inside a single bundle are not fatal; they surface as
/// [`BuildWarning`](super::BuildWarning)s in the report instead.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to prepare output directory `{0}`")]
    Clean(PathBuf, #[source] std::io::Error),

    #[error("failed to write manifest")]
    Manifest(#[from] ManifestError),
}
