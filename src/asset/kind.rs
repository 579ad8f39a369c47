//! Asset kind definitions.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Kind of bundled asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Stylesheet bundle.
    Css,
    /// Script bundle.
    Js,
}

impl AssetKind {
    /// All kinds, in build order.
    pub const ALL: [Self; 2] = [Self::Css, Self::Js];

    /// File extension without the leading dot.
    pub const fn ext(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Js => "js",
        }
    }

    /// Detect kind from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "css" => Some(Self::Css),
            "js" | "mjs" => Some(Self::Js),
            _ => None,
        }
    }

    /// Inserted between two combined files.
    ///
    /// A JS file may end without a semicolon; `;` stops the next file from
    /// continuing its last expression.
    pub const fn separator(self) -> &'static str {
        match self {
            Self::Css => "",
            Self::Js => ";\n",
        }
    }

    /// Origin marker placed before each combined file.
    ///
    /// Block comments are valid in both CSS and JS.
    pub fn origin_marker(self, origin: &str) -> String {
        format!("/* {origin} */\n")
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ext())
    }
}
