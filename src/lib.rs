//! cachebust - combine, minify and content-hash CSS/JS bundles.
//!
//! A build cleans the output directory, turns each configured bundle into
//! one `<stem>.<hash>.<ext>` file and records it in a JSON manifest that
//! maps logical keys (`css/main.css`) to emitted paths.
//!
//! ```ignore
//! use cachebust::asset::AssetKind;
//! use cachebust::builder::{AssetBuilder, BundleTarget};
//!
//! let report = AssetBuilder::new("static", "static/dist")
//!     .url_prefix("dist")
//!     .bundle(BundleTarget::new(AssetKind::Css, "css/main.css", vec!["css/a.css".into()]))
//!     .build()?;
//! println!("{}", report.manifest.resolve("css/main.css"));
//! ```

pub mod asset;
pub mod builder;
pub mod cli;
pub mod config;
pub mod logger;
pub mod utils;

pub use asset::{AssetKind, Manifest, Minifier};
pub use builder::{AssetBuilder, BuildError, BuildReport, BundleTarget};
pub use config::ProjectConfig;
