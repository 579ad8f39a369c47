//! Asset minification for JS and CSS bundles.
//!
//! Uses oxc for JavaScript and lightningcss for CSS. Minification is
//! best-effort: a backend error or panic yields the original text as
//! [`MinifyOutcome::Unchanged`], never a failed build.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::ast::ast::Statement;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier as OxcMinifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;
use thiserror::Error;

use super::AssetKind;

#[derive(Debug, Error)]
pub enum MinifyError {
    #[error("css: {0}")]
    Css(String),

    #[error("js: {0} parse error(s)")]
    JsParse(usize),

    #[error("js: minified output is empty")]
    JsEmptied,

    #[error("backend panicked: {0}")]
    Panic(String),
}

/// A minification backend.
pub trait MinifyBackend {
    /// Short name for log output.
    fn name(&self) -> &'static str;

    fn minify(&self, kind: AssetKind, source: &str) -> Result<String, MinifyError>;
}

/// Result of a minification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinifyOutcome {
    Minified(String),
    /// Original content. `reason` is `None` when minification is disabled.
    Unchanged {
        content: String,
        reason: Option<String>,
    },
}

impl MinifyOutcome {
    pub fn content(&self) -> &str {
        match self {
            Self::Minified(content) | Self::Unchanged { content, .. } => content,
        }
    }

    pub fn into_content(self) -> String {
        match self {
            Self::Minified(content) | Self::Unchanged { content, .. } => content,
        }
    }

    pub const fn is_minified(&self) -> bool {
        matches!(self, Self::Minified(_))
    }

    /// Why the backend failed, if it did.
    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            Self::Unchanged {
                reason: Some(reason),
                ..
            } => Some(reason),
            _ => None,
        }
    }
}

/// Fails-open minifier over an optional backend.
pub struct Minifier {
    backend: Option<Box<dyn MinifyBackend>>,
}

impl Minifier {
    /// lightningcss + oxc.
    pub fn native() -> Self {
        Self::with_backend(NativeBackend)
    }

    /// No backend: every call returns the input unchanged.
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    pub fn with_backend(backend: impl MinifyBackend + 'static) -> Self {
        Self {
            backend: Some(Box::new(backend)),
        }
    }

    /// `native()` when `enabled`, `disabled()` otherwise.
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Self::native()
        } else {
            Self::disabled()
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.as_ref().map_or("none", |b| b.name())
    }

    /// Minify `source`, falling back to it unchanged on any backend fault.
    pub fn minify(&self, kind: AssetKind, source: String) -> MinifyOutcome {
        let Some(backend) = &self.backend else {
            return MinifyOutcome::Unchanged {
                content: source,
                reason: None,
            };
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| backend.minify(kind, &source)))
            .unwrap_or_else(|payload| Err(MinifyError::Panic(panic_message(&*payload))));

        match result {
            Ok(minified) => MinifyOutcome::Minified(minified),
            Err(e) => MinifyOutcome::Unchanged {
                content: source,
                reason: Some(format!("{} backend: {e}", backend.name())),
            },
        }
    }
}

impl Default for Minifier {
    fn default() -> Self {
        Self::native()
    }
}

impl fmt::Debug for Minifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Minifier")
            .field("backend", &self.backend_name())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

// ============================================================================
// Native backend
// ============================================================================

/// lightningcss for CSS, oxc for JS.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl MinifyBackend for NativeBackend {
    fn name(&self) -> &'static str {
        "native"
    }

    fn minify(&self, kind: AssetKind, source: &str) -> Result<String, MinifyError> {
        match kind {
            AssetKind::Css => minify_css(source),
            AssetKind::Js => minify_js(source),
        }
    }
}

/// Minify JavaScript source code.
///
/// Bundles are served from plain `<script>` tags, so a bundle without
/// `import`/`export` is treated as a classic script: its top-level
/// declarations are globals and are neither renamed nor dropped.
pub fn minify_js(source: &str) -> Result<String, MinifyError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::unambiguous()).parse();
    if !ret.errors.is_empty() {
        return Err(MinifyError::JsParse(ret.errors.len()));
    }
    let mut program = ret.program;
    let had_code = has_statements(&program.body);

    let options = MinifierOptions {
        mangle: Some(MangleOptions {
            top_level: Some(false),
            ..MangleOptions::default()
        }),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = OxcMinifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    check_not_emptied(had_code, code)
}

fn has_statements(body: &[Statement<'_>]) -> bool {
    body.iter()
        .any(|stmt| !matches!(stmt, Statement::EmptyStatement(_)))
}

/// A bundle with code must not minify to nothing.
fn check_not_emptied(had_code: bool, code: String) -> Result<String, MinifyError> {
    if had_code && code.trim().is_empty() {
        Err(MinifyError::JsEmptied)
    } else {
        Ok(code)
    }
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Result<String, MinifyError> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default())
        .map_err(|e| MinifyError::Css(e.to_string()))?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| MinifyError::Css(e.to_string()))?;
    Ok(result.code)
}
