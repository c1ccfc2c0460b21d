//! Archive error types.

use std::path::PathBuf;

/// Errors produced while packing the source directory.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
