//! Utility modules.

pub mod path;
pub mod plural;
pub mod size;

pub use plural::{plural_count, plural_s};
pub use size::{format_bytes, savings_percent};
