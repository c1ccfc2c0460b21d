//! Source archive construction.
//!
//! Walks the AI source directory, skips hidden paths and packs the rest
//! into a zip file that lives in a temporary directory for as long as the
//! returned [`SourceArchive`] is alive.

pub mod error;
pub mod scanner;
pub mod writer;

pub use error::ArchiveError;
pub use scanner::{SourceFile, archive_name, is_visible, scan_source_files};
pub use writer::{ARCHIVE_FILE_NAME, SourceArchive, build_archive};
