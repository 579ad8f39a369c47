//! Configuration utility types.
//!
//! | Module   | Purpose                                      |
//! |----------|----------------------------------------------|
//! | `error`  | Configuration error types and diagnostics    |
//! | `field`  | Type-safe config field paths                 |
//! | `status` | Field status validation                      |

mod error;
mod field;
mod status;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
pub use status::{FieldStatus, check_field_status};
