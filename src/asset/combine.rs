//! Ordered concatenation of source files into a single bundle.
//!
//! Each file is prefixed with an origin marker naming its declared path.
//! Declared files that do not exist are skipped, which lets optional
//! stylesheets be listed without being present. Nothing time- or
//! environment-dependent goes into the buffer.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{AssetError, AssetKind};
use crate::debug;
use crate::utils::path::to_slash;

/// A declared source path plus its raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as declared, relative to the source directory.
    pub path: PathBuf,
    pub content: Vec<u8>,
}

impl SourceFile {
    /// Read a declared file. `Ok(None)` if it does not exist.
    pub fn read(base: &Path, rel: &Path) -> Result<Option<Self>, AssetError> {
        let full = base.join(rel);
        match fs::read(&full) {
            Ok(content) => Ok(Some(Self {
                path: rel.to_path_buf(),
                content,
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AssetError::Read(full, e)),
        }
    }

    /// Declared path with forward slashes, used as the origin marker.
    pub fn origin(&self) -> String {
        to_slash(&self.path)
    }
}

/// Concatenated sources of one asset kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub kind: AssetKind,
    /// Origins of the files included, in order.
    pub included: Vec<String>,
    /// Declared files that were not found.
    pub skipped: Vec<PathBuf>,
    pub content: Vec<u8>,
}

impl Bundle {
    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }

    /// Size of the combined buffer in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Decode the buffer as text for minification.
    pub fn into_text(self) -> Result<String, AssetError> {
        let kind = self.kind;
        String::from_utf8(self.content).map_err(|e| {
            // Blame the file whose span contains the first invalid byte
            let offset = e.utf8_error().valid_up_to();
            let origin = locate_origin(kind, &self.included, e.as_bytes(), offset);
            AssetError::Utf8 { kind, origin }
        })
    }
}

/// Combine `files` (relative to `base`) in declared order.
pub fn combine(base: &Path, files: &[PathBuf], kind: AssetKind) -> Result<Bundle, AssetError> {
    let mut bundle = Bundle {
        kind,
        included: Vec::with_capacity(files.len()),
        skipped: Vec::new(),
        content: Vec::new(),
    };

    for rel in files {
        let Some(file) = SourceFile::read(base, rel)? else {
            debug!("combine"; "skipping missing {}", rel.display());
            bundle.skipped.push(rel.clone());
            continue;
        };

        let origin = file.origin();
        if !bundle.included.is_empty() {
            bundle.content.extend_from_slice(kind.separator().as_bytes());
        }
        bundle.content.extend_from_slice(kind.origin_marker(&origin).as_bytes());
        bundle.content.extend_from_slice(&file.content);
        if !file.content.ends_with(b"\n") {
            bundle.content.push(b'\n');
        }
        bundle.included.push(origin);
    }

    Ok(bundle)
}

/// Find which included file a byte offset falls into, by scanning markers.
fn locate_origin(kind: AssetKind, included: &[String], content: &[u8], offset: usize) -> String {
    let mut current = included.first().cloned().unwrap_or_default();
    let mut pos = 0;
    for origin in included {
        let marker = kind.origin_marker(origin);
        let Some(found) = find(&content[pos..], marker.as_bytes()) else {
            break;
        };
        if pos + found > offset {
            break;
        }
        current = origin.clone();
        pos += found + marker.len();
    }
    current
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_combine_preserves_order_with_markers() {
        let dir = setup(&[("a.css", "body{color:red}"), ("b.css", "p{color:blue}\n")]);
        let bundle = combine(dir.path(), &paths(&["a.css", "b.css"]), AssetKind::Css).unwrap();

        assert_eq!(
            String::from_utf8(bundle.content.clone()).unwrap(),
            "/* a.css */\nbody{color:red}\n/* b.css */\np{color:blue}\n"
        );
        assert_eq!(bundle.included, vec!["a.css", "b.css"]);
        assert!(bundle.skipped.is_empty());
    }

    #[test]
    fn test_js_files_are_separated() {
        let dir = setup(&[
            ("a.js", "var ready = init\n"),
            ("b.js", "(function () { ready = 1 })()"),
        ]);
        let bundle = combine(dir.path(), &paths(&["a.js", "b.js"]), AssetKind::Js).unwrap();

        let text = bundle.into_text().unwrap();
        assert_eq!(
            text,
            "/* a.js */\nvar ready = init\n;\n/* b.js */\n(function () { ready = 1 })()\n"
        );

        let minified = crate::asset::minify::minify_js(&text).unwrap();
        assert!(!minified.contains("init("), "IIFE merged into call: {minified}");
    }

    #[test]
    fn test_single_js_file_has_no_separator() {
        let dir = setup(&[("a.js", "run()")]);
        let bundle = combine(dir.path(), &paths(&["missing.js", "a.js"]), AssetKind::Js).unwrap();
        assert_eq!(bundle.content, b"/* a.js */\nrun()\n");
    }

    #[test]
    fn test_reordering_changes_output() {
        let dir = setup(&[("a.css", "a{}"), ("b.css", "b{}")]);
        let ab = combine(dir.path(), &paths(&["a.css", "b.css"]), AssetKind::Css).unwrap();
        let ba = combine(dir.path(), &paths(&["b.css", "a.css"]), AssetKind::Css).unwrap();
        assert_ne!(ab.content, ba.content);
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = setup(&[("a.css", "a{}")]);
        let with_missing =
            combine(dir.path(), &paths(&["missing.css", "a.css"]), AssetKind::Css).unwrap();
        let without = combine(dir.path(), &paths(&["a.css"]), AssetKind::Css).unwrap();

        assert_eq!(with_missing.content, without.content);
        assert_eq!(with_missing.skipped, vec![PathBuf::from("missing.css")]);
    }

    #[test]
    fn test_all_missing_gives_empty_bundle() {
        let dir = setup(&[]);
        let bundle = combine(dir.path(), &paths(&["x.js"]), AssetKind::Js).unwrap();
        assert!(bundle.is_empty());
        assert_eq!(bundle.len(), 0);
    }

    #[test]
    fn test_origin_uses_forward_slashes() {
        let dir = setup(&[("css/nested/a.css", "a{}")]);
        let rel = Path::new("css").join("nested").join("a.css");
        let bundle = combine(dir.path(), &[rel], AssetKind::Css).unwrap();
        assert_eq!(bundle.included, vec!["css/nested/a.css"]);
    }

    #[test]
    fn test_directory_is_read_error() {
        let dir = setup(&[("css/a.css", "a{}")]);
        let result = combine(dir.path(), &paths(&["css"]), AssetKind::Css);
        assert!(matches!(result, Err(AssetError::Read(..))));
    }

    #[test]
    fn test_invalid_utf8_names_offending_file() {
        let dir = setup(&[("a.js", "let a = 1;")]);
        fs::write(dir.path().join("b.js"), [0x66, 0xff, 0xfe]).unwrap();
        let bundle = combine(dir.path(), &paths(&["a.js", "b.js"]), AssetKind::Js).unwrap();

        match bundle.into_text() {
            Err(AssetError::Utf8 { kind, origin }) => {
                assert_eq!(kind, AssetKind::Js);
                assert_eq!(origin, "b.js");
            }
            other => panic!("expected utf8 error, got {other:?}"),
        }
    }
}
