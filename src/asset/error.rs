//! Per-asset error types.
//!
//! An `AssetError` only ever skips the bundle it happened in; the build
//! carries on with the next bundle.

use std::path::PathBuf;

use thiserror::Error;

use super::AssetKind;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("{kind} bundle is not valid UTF-8 (from `{origin}`)")]
    Utf8 { kind: AssetKind, origin: String },

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}
