//! Zip writer for the scanned source tree.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::write::FileOptions;

use crate::error::ArchiveError;
use crate::scanner::scan_source_files;

/// Name of the archive inside its temporary directory.
pub const ARCHIVE_FILE_NAME: &str = "source.zip";

/// A packed source tree.
///
/// The zip lives in a private temporary directory that is removed when
/// this value is dropped.
#[derive(Debug)]
pub struct SourceArchive {
    _dir: TempDir,
    path: PathBuf,
    file_count: usize,
    total_size: u64,
}

impl SourceArchive {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of files packed.
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    /// Uncompressed size of the packed files in bytes.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Reads the whole archive into memory for upload.
    pub fn read(&self) -> Result<Vec<u8>, ArchiveError> {
        Ok(std::fs::read(&self.path)?)
    }
}

/// Packs every visible file under `source` into a fresh temporary zip.
pub fn build_archive(source: &Path) -> Result<SourceArchive, ArchiveError> {
    let files = scan_source_files(source)?;

    let dir = tempfile::Builder::new().prefix("saiblo-upload-").tempdir()?;
    let path = dir.path().join(ARCHIVE_FILE_NAME);

    let mut zip = zip::ZipWriter::new(BufWriter::new(File::create(&path)?));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut total_size = 0u64;
    for file in &files {
        debug!(name = %file.archive_name, bytes = file.size, "adding file");
        zip.start_file(file.archive_name.as_str(), options)?;
        let mut reader = File::open(&file.path)?;
        total_size += std::io::copy(&mut reader, &mut zip)?;
    }
    zip.finish()?.flush()?;

    info!(
        source = %source.display(),
        files = files.len(),
        total_bytes = total_size,
        "archive built"
    );

    Ok(SourceArchive {
        _dir: dir,
        path,
        file_count: files.len(),
        total_size,
    })
}
