//! # File Management Module
//!
//! File discovery, classification and charset-aware text I/O.
//!
//! ## Responsibilities:
//! - Recursive discovery of source files under one or more paths
//! - Classification by filename suffix (compile JS / compress CSS / skip)
//! - Full-file text reads and destructive overwrites under the active charset
//! - Human-readable size formatting for the run summary
//!
//! ## Selection policy:
//! - `*.js` but not `*-min.js` -> compile (JavaScript tool)
//! - `*.css` but not `*-min.css` -> compress (CSS tool)
//! - everything else -> skip
//!
//! Matching is case-insensitive and re-derived on every traversal. Already
//! minified outputs (`-min` suffix) are never fed back through a tool.
//!
//! ## Example:
//! ```rust,ignore
//! let files = FileManager::find_source_files(Path::new("assets"));
//! for (path, kind) in files {
//!     if kind == FileKind::Compile {
//!         // pipe through the JS tool
//!     }
//! }
//! ```

use crate::charset::Charset;
use crate::error::CompressError;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Classification of a discovered file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// JavaScript source, piped through the JS compiler
    Compile,
    /// CSS source, piped through the CSS compressor
    Compress,
    /// Not a compression target
    Skip,
}

/// Manages file discovery and charset-aware file operations
pub struct FileManager;

impl FileManager {
    /// Classify a filename by suffix, case-insensitively
    pub fn classify(file_name: &str) -> FileKind {
        let name = file_name.to_lowercase();
        if name.ends_with(".js") && !name.ends_with("-min.js") {
            FileKind::Compile
        } else if name.ends_with(".css") && !name.ends_with("-min.css") {
            FileKind::Compress
        } else {
            FileKind::Skip
        }
    }

    /// Recursively enumerate a path and classify every regular file.
    ///
    /// A regular-file argument yields its single classified pair; a directory
    /// yields the union of its entries, depth-first, unbounded depth. Entry
    /// order is whatever the filesystem reports. Symlinks are not followed,
    /// matching the traversal's lack of a cycle guard.
    pub fn find_source_files(path: &Path) -> Vec<(PathBuf, FileKind)> {
        WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let kind = Self::classify(&e.file_name().to_string_lossy());
                (e.into_path(), kind)
            })
            .collect()
    }

    /// Read a file fully and decode it under the active charset
    pub async fn read_text(path: &Path, charset: Charset) -> Result<String, CompressError> {
        if path.is_dir() {
            return Err(CompressError::FileRead {
                path: path.to_path_buf(),
                reason: "is a directory".to_string(),
            });
        }
        let bytes = fs::read(path).await.map_err(|e| CompressError::FileRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        charset.decode(&bytes).ok_or_else(|| CompressError::FileRead {
            path: path.to_path_buf(),
            reason: format!("not valid {}", charset.name()),
        })
    }

    /// Overwrite a file's full contents, encoded under the active charset.
    ///
    /// Destructive, no backup: callers only reach this after the read and
    /// the tool invocation both succeeded.
    pub async fn write_text(path: &Path, text: &str, charset: Charset) -> Result<(), CompressError> {
        if path.is_dir() {
            return Err(CompressError::FileWrite {
                path: path.to_path_buf(),
                reason: "is a directory".to_string(),
            });
        }
        fs::write(path, charset.encode(text))
            .await
            .map_err(|e| CompressError::FileWrite {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_classify_suffixes() {
        assert_eq!(FileManager::classify("app.js"), FileKind::Compile);
        assert_eq!(FileManager::classify("app.css"), FileKind::Compress);
        assert_eq!(FileManager::classify("app-min.js"), FileKind::Skip);
        assert_eq!(FileManager::classify("app-min.css"), FileKind::Skip);
        assert_eq!(FileManager::classify("readme.txt"), FileKind::Skip);
        assert_eq!(FileManager::classify("js"), FileKind::Skip);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(FileManager::classify("Foo.JS"), FileKind::Compile);
        assert_eq!(FileManager::classify("foo.js"), FileKind::Compile);
        assert_eq!(FileManager::classify("FOO.js"), FileKind::Compile);
        assert_eq!(FileManager::classify("STYLE.CSS"), FileKind::Compress);
        assert_eq!(FileManager::classify("APP-MIN.JS"), FileKind::Skip);
    }

    #[test]
    fn test_find_source_files_classifies_tree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::write(root.join("a.js"), "var a;").unwrap();
        std::fs::write(root.join("b-min.js"), "var b;").unwrap();
        std::fs::write(root.join("c.css"), "body{}").unwrap();
        std::fs::write(root.join("d.txt"), "notes").unwrap();
        std::fs::create_dir(root.join("empty")).unwrap();

        let found: HashMap<String, FileKind> = FileManager::find_source_files(root)
            .into_iter()
            .map(|(p, k)| (p.file_name().unwrap().to_string_lossy().into_owned(), k))
            .collect();

        assert_eq!(found.len(), 4);
        assert_eq!(found["a.js"], FileKind::Compile);
        assert_eq!(found["b-min.js"], FileKind::Skip);
        assert_eq!(found["c.css"], FileKind::Compress);
        assert_eq!(found["d.txt"], FileKind::Skip);
    }

    #[test]
    fn test_find_source_files_recurses_and_accepts_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("nested/deep")).unwrap();
        std::fs::write(root.join("nested/deep/x.js"), "var x;").unwrap();

        let found = FileManager::find_source_files(root);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1, FileKind::Compile);

        let single = FileManager::find_source_files(&root.join("nested/deep/x.js"));
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].1, FileKind::Compile);
    }

    #[tokio::test]
    async fn test_read_write_text_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.js");
        let charset = Charset::default();

        FileManager::write_text(&path, "var café = 1;", charset)
            .await
            .unwrap();
        let text = FileManager::read_text(&path, charset).await.unwrap();
        assert_eq!(text, "var café = 1;");
    }

    #[tokio::test]
    async fn test_read_text_errors() {
        let temp_dir = TempDir::new().unwrap();
        let charset = Charset::default();

        let missing = FileManager::read_text(&temp_dir.path().join("nope.js"), charset).await;
        assert!(matches!(missing, Err(CompressError::FileRead { .. })));

        let dir = FileManager::read_text(temp_dir.path(), charset).await;
        assert!(matches!(dir, Err(CompressError::FileRead { .. })));

        let bad = temp_dir.path().join("bad.js");
        std::fs::write(&bad, [0xffu8, 0xfe, 0xfd]).unwrap();
        let undecodable = FileManager::read_text(&bad, charset).await;
        assert!(matches!(undecodable, Err(CompressError::FileRead { .. })));
    }

    #[tokio::test]
    async fn test_write_text_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = FileManager::write_text(temp_dir.path(), "x", Charset::default()).await;
        assert!(matches!(result, Err(CompressError::FileWrite { .. })));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(FileManager::format_size(512), "512 B");
        assert_eq!(FileManager::format_size(2048), "2.00 KB");
    }
}
