//! Credential handling.

use std::fmt;

/// The user's Saiblo login token.
///
/// Passed explicitly to every client that talks to the server. `Debug`
/// never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Value of the `Authorization` header, e.g. `Token abc`.
    pub fn authorization(&self) -> String {
        format!("Token {}", self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential").field("token", &"<redacted>").finish()
    }
}
