//! Upload error types.

use std::path::PathBuf;
use std::time::Duration;

use saiblo_api::ApiError;
use saiblo_archive::ArchiveError;
use saiblo_realtime::RealtimeError;

/// Errors that end an upload run. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("{} is not a directory", .0.display())]
    InvalidSourcePath(PathBuf),

    #[error("game {0} not found")]
    GameNotFound(String),

    #[error("AI {name} already exists with language {existing}, not {requested}")]
    EntityLanguageConflict {
        name: String,
        existing: String,
        requested: String,
    },

    #[error("AI {name} already exists with repository {existing}, not {requested}")]
    EntityRepoConflict {
        name: String,
        existing: String,
        requested: String,
    },

    #[error("compile failed for version {version}:\n{message}")]
    CompileFailed { version: u32, message: String },

    #[error("no compile result for version {version} within {}s", .timeout.as_secs())]
    Timeout { version: u32, timeout: Duration },

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("archive error: {0}")]
    Archive(ArchiveError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("realtime error: {0}")]
    Realtime(#[from] RealtimeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ArchiveError> for SubmitError {
    fn from(e: ArchiveError) -> Self {
        match e {
            ArchiveError::NotADirectory(path) => Self::InvalidSourcePath(path),
            other => Self::Archive(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_directory_maps_to_invalid_source_path() {
        let err: SubmitError = ArchiveError::NotADirectory(PathBuf::from("/tmp/x.py")).into();
        assert!(matches!(err, SubmitError::InvalidSourcePath(ref p) if p == &PathBuf::from("/tmp/x.py")));
        assert_eq!(err.to_string(), "/tmp/x.py is not a directory");
    }

    #[test]
    fn conflict_messages_are_distinct() {
        let lang = SubmitError::EntityLanguageConflict {
            name: "Bar".into(),
            existing: "cpp_zip".into(),
            requested: "python_zip".into(),
        };
        let repo = SubmitError::EntityRepoConflict {
            name: "Bar".into(),
            existing: "https://a".into(),
            requested: "https://b".into(),
        };
        assert!(lang.to_string().contains("language cpp_zip"));
        assert!(repo.to_string().contains("repository https://a"));
        assert_ne!(lang.to_string(), repo.to_string());
    }

    #[test]
    fn timeout_display() {
        let err = SubmitError::Timeout {
            version: 3,
            timeout: Duration::from_secs(90),
        };
        assert_eq!(err.to_string(), "no compile result for version 3 within 90s");
    }
}
