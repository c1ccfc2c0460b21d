//! AI upload flow.
//!
//! This crate implements the **business logic** of one upload run. The
//! binary provides the configuration and the concrete HTTP / WebSocket
//! clients; everything here talks to them through the [`SaibloApi`] and
//! [`CompileChannel`] traits.
//!
//! # Pipeline
//!
//! 1. **Archive** — pack the visible files of the source directory
//! 2. **Identity** — resolve game, user and entity (creating the entity once)
//! 3. **Subscribe** — open the realtime channel and announce the entity
//! 4. **Upload** — post the archive as a new code version
//! 5. **Wait** — block until the compile result for that version arrives

pub mod backend;
pub mod coordinator;
pub mod error;
pub mod identity;
pub mod types;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{ChannelConnector, CompileChannel, RealtimeConnector, SaibloApi};
pub use coordinator::{SubmissionCoordinator, Subscription};
pub use error::SubmitError;
pub use identity::resolve_identity;
pub use types::{AiIdentity, CompiledCode, SubmitRequest};
pub use workflow::run_upload;
