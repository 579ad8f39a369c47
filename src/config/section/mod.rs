//! Configuration section definitions.
//!
//! Each module corresponds to a section in `cachebust.toml`:
//!
//! | Module   | TOML Section                   | Purpose                        |
//! |----------|--------------------------------|--------------------------------|
//! | `build`  | `[build]`                      | Paths, minification, hashing   |
//! | `bundle` | `[bundle.css]`, `[bundle.js]`  | Bundle keys and source order   |

pub mod build;
pub mod bundle;

pub use build::BuildConfig;
pub use bundle::{BundleSpec, BundlesConfig, CssBundleConfig, JsBundleConfig};
