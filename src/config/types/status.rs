//! Field status checks for config validation.
//!
//! Called by the `validate_field_status` methods generated by
//! `#[derive(Config)]` for fields marked `#[config(status = ...)]`.

use super::FieldPath;
use crate::config::ConfigDiagnostics;

/// Field status for validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Experimental,
}

impl FieldStatus {
    /// Get status label for display.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Experimental => "experimental",
        }
    }
}

/// Report a field with special status that differs from its default.
pub fn check_field_status(field_path: &str, status: FieldStatus, diag: &mut ConfigDiagnostics) {
    if status == FieldStatus::Experimental && diag.allow_experimental {
        return;
    }

    // Generated paths are string literals; leaking keeps FieldPath 'static
    let path = FieldPath::new(Box::leak(field_path.to_string().into_boxed_str()));

    match status {
        FieldStatus::Experimental => diag.experimental_hint(path),
    }
}
