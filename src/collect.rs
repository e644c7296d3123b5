//! File collection — the first pipeline stage.
//!
//! Walks a root directory and gathers every source file matching the
//! configured extension, in traversal order. The walk respects
//! .gitignore and skips a small set of directories that should never be
//! indexed. Collection fails outright if the root is missing or no
//! files match; there is nothing for the later stages to do then.

use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{RepoGraphError, Result};

/// Directories that should never be scanned, even without .gitignore.
const BUILTIN_IGNORE: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    "__pycache__",
    ".tox",
    ".venv",
    "venv",
    "env",
    ".env",
    "node_modules",
    "target",
    ".cache",
];

/// One collected source file: its root-relative path and its lines.
///
/// Lines are stored in order, 1-based when addressed, with the trailing
/// newline stripped. Immutable once read.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the scan root, forward-slash normalized.
    pub rel_path: String,
    /// Ordered line contents.
    pub lines: Vec<String>,
}

/// Check if a path contains any built-in ignored directory.
fn is_builtin_ignored(path: &Path) -> bool {
    path.components().any(|c| {
        if let std::path::Component::Normal(name) = c {
            BUILTIN_IGNORE.contains(&name.to_str().unwrap_or(""))
        } else {
            false
        }
    })
}

/// Collect all files with the given extension under `root`.
///
/// Order is traversal order, not sorted. Fails with
/// [`RepoGraphError::PathNotFound`] if `root` does not exist and
/// [`RepoGraphError::EmptyRepository`] if nothing matches.
pub fn collect_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(RepoGraphError::PathNotFound(root.to_path_buf()));
    }

    let files: Vec<PathBuf> = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| !is_builtin_ignored(entry.path()))
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == extension)
        })
        .map(|entry| entry.into_path())
        .collect();

    if files.is_empty() {
        return Err(RepoGraphError::EmptyRepository(root.to_path_buf()));
    }

    debug!(count = files.len(), root = %root.display(), "collected source files");
    Ok(files)
}

/// Read one file into a [`SourceFile`], relative to the scan root.
///
/// The relative path uses forward slashes regardless of platform, so
/// node identifiers are stable across systems.
pub fn read_source(root: &Path, path: &Path) -> Result<SourceFile> {
    let contents = fs::read_to_string(path)?;
    let rel_path = relative_posix(root, path);
    let lines = contents.lines().map(str::to_string).collect();

    Ok(SourceFile { rel_path, lines })
}

/// Root-relative path with `/` separators.
fn relative_posix(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
