//! Saiblo REST API client.
//!
//! Async client for the endpoints the uploader needs: game lookup, the
//! authenticated profile, entity listing/creation and code uploads.

pub mod client;

pub use client::{ApiError, Client, DEFAULT_BASE_URL, DEV_BASE_URL};
