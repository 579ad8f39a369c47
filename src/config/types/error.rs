//! Configuration errors and collected validation diagnostics.
//!
//! Validation never stops at the first problem: every check reports into a
//! [`ConfigDiagnostics`], which becomes one [`ConfigError::Diagnostics`].

use owo_colors::Style;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::FieldPath;
use crate::logger::paint;
use crate::utils::plural_count;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid TOML in config")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Validation(String),

    // Not #[from]: the diagnostics already render every problem
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// One problem with a config field.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<String>,
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {}", self.field, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n    {} {hint}", paint("hint:", Style::new().yellow()))?;
        }
        Ok(())
    }
}

/// Problems and experimental-field hints gathered during validation.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
    hints: Vec<FieldPath>,
    /// Suppress experimental hints.
    pub allow_experimental: bool,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allow_experimental(allow_experimental: bool) -> Self {
        Self {
            allow_experimental,
            ..Self::default()
        }
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(field, message.into(), None);
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.push(field, message.into(), Some(hint.into()));
    }

    fn push(&mut self, field: FieldPath, message: String, hint: Option<String>) {
        self.errors.push(ConfigDiagnostic {
            field,
            message,
            hint,
        });
    }

    /// Record a non-default experimental field.
    pub fn experimental_hint(&mut self, field: FieldPath) {
        self.hints.push(field);
    }

    pub fn hints(&self) -> &[FieldPath] {
        &self.hints
    }

    pub fn print_hints(&self) {
        if self.hints.is_empty() {
            return;
        }
        crate::log!("hint"; "experimental fields, may change or be removed:");
        for field in &self.hints {
            eprintln!("- {}", field.as_str());
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    /// `Err(self)` if any error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = format!("config has {}:", plural_count(self.errors.len(), "problem"));
        write!(f, "{}", paint(heading, Style::new().red().bold()))?;
        for err in &self.errors {
            write!(f, "\n{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_names_file() {
        let err = ConfigError::Io(
            PathBuf::from("cachebust.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        assert_eq!(err.to_string(), "cannot read config `cachebust.toml`");
    }

    #[test]
    fn test_diagnostics_render_every_problem() {
        owo_colors::set_override(false);
        let mut diag = ConfigDiagnostics::new();
        diag.error(FieldPath::new("build.source"), "absolute paths not allowed");
        diag.error_with_hint(
            FieldPath::new("build.output"),
            "contains the source directory",
            "point output at a dedicated directory",
        );
        assert_eq!(diag.len(), 2);
        assert_eq!(diag.errors()[1].hint.as_deref(), Some("point output at a dedicated directory"));

        let text = diag.into_result().unwrap_err().to_string();
        assert_eq!(
            text,
            "config has 2 problems:\n  \
             `build.source`: absolute paths not allowed\n  \
             `build.output`: contains the source directory\n    \
             hint: point output at a dedicated directory"
        );
    }

    #[test]
    fn test_empty_diagnostics_is_ok() {
        assert!(ConfigDiagnostics::new().into_result().is_ok());
    }
}
