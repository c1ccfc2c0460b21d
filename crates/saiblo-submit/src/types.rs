//! Data types for the upload flow.

use std::path::PathBuf;

use saiblo_protocol::{Entity, Game, Language};

/// Everything one invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    /// Game name, matched exactly.
    pub game: String,
    /// AI (entity) name, matched exactly within the user's entities.
    pub ai_name: String,
    pub repo: String,
    /// Commit reference, sent as the code version's remark.
    pub commit: String,
    pub language: Language,
    pub source_dir: PathBuf,
}

/// Result of identity resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiIdentity {
    pub game: Game,
    pub username: String,
    pub entity: Entity,
    /// `true` if the entity did not exist and was created by this run.
    pub created: bool,
}

/// A code version the server compiled successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledCode {
    pub version: u32,
    pub token: String,
}
