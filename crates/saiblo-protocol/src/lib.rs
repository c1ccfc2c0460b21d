//! Wire protocol types shared by the Saiblo uploader crates.
//!
//! `types` holds the resources the REST API returns, `messages` holds
//! request bodies and the realtime channel frames, `auth` holds the
//! credential both channels authenticate with.

pub mod auth;
pub mod messages;
pub mod types;

pub use auth::Credential;
pub use messages::{
    AnnounceMessage, CodeVersion, CompileNotification, CompileStatus, CreateEntityRequest,
    EntityList, ProfileResponse,
};
pub use types::{Entity, EntityId, Game, GameId, Language, UnknownLanguage, User};
