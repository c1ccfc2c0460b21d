//! Realtime channel for compile notifications.
//!
//! Connects to the server's `ai` WebSocket endpoint, announces the entity
//! whose submissions should be observed, and yields the notifications the
//! server pushes afterwards.

pub mod ws_client;

pub use ws_client::{DEFAULT_WS_URL, DEV_WS_URL, RealtimeClient, RealtimeError, channel_url};
