//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro that only prints in verbose mode
//!
//! # Example
//!
//! ```ignore
//! log!("build"; "wrote {} ({} bytes)", name, len);
//! debug!("combine"; "skipping missing {}", path.display());
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream, Style};
use std::{
    fmt,
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let style = match module_lower {
        "build" => Style::new().bright_blue(),
        "done" => Style::new().bright_green(),
        "warning" => Style::new().bright_magenta(),
        "error" => Style::new().bright_red(),
        _ => Style::new().bright_yellow(),
    };
    paint(format!("[{module}]"), style.bold())
}

/// Render `value` in `style` when stdout supports color.
///
/// Honors `owo_colors::set_override`, so `--color never` yields plain text.
pub fn paint(value: impl fmt::Display, style: Style) -> String {
    value
        .if_supports_color(Stream::Stdout, |v| v.style(style))
        .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_contains_module_name() {
        owo_colors::set_override(false);
        assert_eq!(colorize_prefix("build", "build"), "[build]");
        assert_eq!(colorize_prefix("Warning", "warning"), "[Warning]");
    }

    #[test]
    fn test_paint_plain_when_colors_disabled() {
        owo_colors::set_override(false);
        assert_eq!(paint("hint:", Style::new().yellow()), "hint:");
        assert_eq!(paint(3, Style::new().red().bold()), "3");
    }

    #[test]
    fn test_verbose_flag_roundtrip() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
