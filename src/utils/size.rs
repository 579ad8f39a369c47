//! Byte size formatting for build summaries.

/// Format a byte count with a binary unit (`B`, `KB`, `MB`).
///
/// - `format_bytes(512)` -> `"512 B"`
/// - `format_bytes(1536)` -> `"1.5 KB"`
pub fn format_bytes(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    #[allow(clippy::cast_precision_loss)] // display only
    let n = bytes as f64;
    if n < KB {
        format!("{bytes} B")
    } else if n < MB {
        format!("{:.1} KB", n / KB)
    } else {
        format!("{:.1} MB", n / MB)
    }
}

/// Percentage saved going from `before` to `after` bytes.
pub fn savings_percent(before: usize, after: usize) -> f64 {
    if before == 0 || after >= before {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = (before - after) as f64 / before as f64;
    ratio * 100.0
}
