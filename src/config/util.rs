//! Configuration utility functions.

use std::path::{Component, Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/app/static/css/    ← start
/// /home/user/app/cachebust.toml ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

/// Reason a configured path is unsafe, if any.
///
/// Configured paths must stay inside the project: no `..`, no absolute paths.
pub fn path_violation(path: &Path) -> Option<&'static str> {
    path.components().find_map(|comp| match comp {
        Component::ParentDir => Some("parent directory '..' not allowed"),
        Component::Prefix(_) | Component::RootDir => Some("absolute paths not allowed"),
        _ => None,
    })
}

/// Drop `.` components so `./static` and `static` compare equal.
pub fn strip_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

// ============================================================================
// tests
// ============================================================================
