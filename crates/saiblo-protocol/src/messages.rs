use serde::{Deserialize, Serialize};

use crate::types::{Entity, EntityId, Language, User};

// ---------------------------------------------------------------------------
// REST payloads
// ---------------------------------------------------------------------------

/// Body of `GET profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: User,
}

/// Body of `GET users/{username}/games/{game_id}/entities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityList {
    pub entities: Vec<Entity>,
}

/// Body of `POST users/{username}/games/{game_id}/entities/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEntityRequest {
    pub language: Language,
    pub name: String,
    pub repo: String,
}

/// Body returned by `POST entities/{entity_id}/codes/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeVersion {
    pub version: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub remark: String,
}

// ---------------------------------------------------------------------------
// Realtime frames
// ---------------------------------------------------------------------------

/// First frame sent on the `ai` channel: which entity to watch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnounceMessage {
    pub entity: EntityId,
}

/// Compile progress for one code version, pushed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileNotification {
    pub version: u32,
    pub compile_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile_message: Option<String>,
    /// Token of the compiled code. The server has sent both strings and
    /// integers here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
}

impl CompileNotification {
    pub fn status(&self) -> CompileStatus {
        CompileStatus::from_wire(&self.compile_status)
    }

    /// The token as printable text, if the frame carries one.
    pub fn token(&self) -> Option<String> {
        match self.id.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Compile state of a code version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileStatus {
    Success,
    Failure,
    /// Queued, compiling, or any other non-terminal state.
    Pending(String),
}

impl CompileStatus {
    /// Server vocabulary for a finished, successful compile.
    pub const SUCCESS: &'static str = "编译成功";
    /// Server vocabulary for a finished, failed compile.
    pub const FAILURE: &'static str = "编译失败";

    pub fn from_wire(s: &str) -> Self {
        match s {
            Self::SUCCESS => Self::Success,
            Self::FAILURE => Self::Failure,
            other => Self::Pending(other.to_string()),
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }
}
