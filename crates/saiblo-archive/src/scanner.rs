//! Source file scanning.
//!
//! Recursively walks a directory and returns the regular files that
//! belong in the archive. Entry names keep the directory as it was given
//! (`bot/main.py` for `bot`), normalized to forward slashes.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ArchiveError;

/// A file selected for packing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute (or caller-relative) path on disk.
    pub path: PathBuf,
    /// Name inside the archive, `/`-separated.
    pub archive_name: String,
    pub size: u64,
}

/// Returns `false` if any segment of `path` starts with a dot.
///
/// `.` and `..` are not names and never hide a path.
pub fn is_visible(path: &Path) -> bool {
    path.components().all(|c| match c {
        Component::Normal(name) => !name.to_string_lossy().starts_with('.'),
        _ => true,
    })
}

/// Archive entry name for `path` as reached from the given source root.
///
/// Roots, drive prefixes, `.` and `..` are dropped so entries always
/// extract below the destination.
pub fn archive_name(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Scans `root` recursively and returns every visible regular file,
/// sorted by archive name.
///
/// The hidden filter applies to the path as reached from `root`, so a
/// root under a dot-directory packs nothing. Hidden directories are
/// pruned without being descended into. Symlinked files are packed with
/// their target's contents; symlinked directories are not entered.
pub fn scan_source_files(root: &Path) -> Result<Vec<SourceFile>, ArchiveError> {
    if !root.is_dir() {
        return Err(ArchiveError::NotADirectory(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| is_visible(entry.path()));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        let file_type = entry.file_type();
        let metadata = if file_type.is_file() {
            entry.metadata()?
        } else if file_type.is_symlink() {
            let target = std::fs::metadata(entry.path())?;
            if !target.is_file() {
                continue;
            }
            target
        } else {
            continue;
        };

        files.push(SourceFile {
            path: entry.path().to_path_buf(),
            archive_name: archive_name(entry.path()),
            size: metadata.len(),
        });
    }

    files.sort_by(|a, b| a.archive_name.cmp(&b.archive_name));
    Ok(files)
}
