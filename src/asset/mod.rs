//! Asset pipeline stages.
//!
//! Data flows one way: sources → [`combine`] → [`Minifier`] →
//! [`ContentHasher`] → written file + [`Manifest`] entry.

mod combine;
mod error;
mod hash;
mod kind;
pub mod manifest;
pub mod minify;

// Types
pub use error::AssetError;
pub use kind::AssetKind;

// Stages
pub use combine::{Bundle, SourceFile, combine};
pub use hash::{ContentHash, ContentHasher};
pub use manifest::{Manifest, ManifestError};
pub use minify::{Minifier, MinifyBackend, MinifyError, MinifyOutcome, NativeBackend};
