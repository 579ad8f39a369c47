//! Build stages.
//!
//! ```text
//! Clean → CssBuilt → JsBuilt → ManifestWritten → Done
//! ```
//!
//! Transitions are strictly sequential. Only `Clean` can stop the build;
//! a bundle that fails still advances to the next stage.

use std::fmt;

use crate::asset::AssetKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildStage {
    Clean,
    CssBuilt,
    JsBuilt,
    ManifestWritten,
    Done,
}

impl BuildStage {
    /// Stage reached once the bundle of `kind` has been handled.
    pub const fn built(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Css => Self::CssBuilt,
            AssetKind::Js => Self::JsBuilt,
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Clean => Some(Self::CssBuilt),
            Self::CssBuilt => Some(Self::JsBuilt),
            Self::JsBuilt => Some(Self::ManifestWritten),
            Self::ManifestWritten => Some(Self::Done),
            Self::Done => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::CssBuilt => "css",
            Self::JsBuilt => "js",
            Self::ManifestWritten => "manifest",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
