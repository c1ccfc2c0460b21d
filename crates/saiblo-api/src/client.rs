//! Saiblo API client.
//!
//! Async HTTP client using `reqwest`. Every request carries the
//! `Authorization: Token ...` header.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::debug;

use saiblo_protocol::{
    CodeVersion, CreateEntityRequest, Credential, Entity, EntityId, EntityList, Game, GameId,
    ProfileResponse, User,
};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.saiblo.net/api/";

/// Development API root.
pub const DEV_BASE_URL: &str = "https://api.dev.saiblo.net/api/";

/// Errors from the Saiblo API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("credential contains characters not allowed in a header")]
    InvalidCredential,
}

/// Saiblo API client.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Creates a client rooted at `base_url` (e.g. [`DEFAULT_BASE_URL`]).
    pub fn new(base_url: &str, credential: &Credential) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&credential.authorization())
            .map_err(|_| ApiError::InvalidCredential)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        debug!(%url, "GET");
        let resp = self.http.get(&url).send().await?;
        decode(resp).await
    }

    /// Lists every game on the platform.
    pub async fn list_games(&self) -> Result<Vec<Game>, ApiError> {
        self.get("games/").await
    }

    /// Returns the user the credential belongs to.
    pub async fn profile(&self) -> Result<User, ApiError> {
        let resp: ProfileResponse = self.get("profile").await?;
        Ok(resp.user)
    }

    /// Lists the entities `username` owns for a game.
    pub async fn list_entities(
        &self,
        username: &str,
        game_id: GameId,
    ) -> Result<Vec<Entity>, ApiError> {
        let user = utf8_percent_encode(username, NON_ALPHANUMERIC);
        let resp: EntityList = self
            .get(&format!("users/{user}/games/{game_id}/entities"))
            .await?;
        Ok(resp.entities)
    }

    /// Registers a new entity for `username` in a game.
    pub async fn create_entity(
        &self,
        username: &str,
        game_id: GameId,
        req: &CreateEntityRequest,
    ) -> Result<Entity, ApiError> {
        let user = utf8_percent_encode(username, NON_ALPHANUMERIC);
        let url = self.url(&format!("users/{user}/games/{game_id}/entities/"));
        debug!(%url, name = %req.name, "POST entity");
        let resp = self.http.post(&url).json(req).send().await?;
        decode(resp).await
    }

    /// Uploads a zipped source archive as a new code version of an entity.
    pub async fn upload_code(
        &self,
        entity_id: EntityId,
        remark: &str,
        file_name: &str,
        archive: Vec<u8>,
    ) -> Result<CodeVersion, ApiError> {
        let url = self.url(&format!("entities/{entity_id}/codes/"));
        debug!(%url, bytes = archive.len(), "POST code");

        let file = Part::bytes(archive)
            .file_name(file_name.to_string())
            .mime_str("application/zip")?;
        let form = Form::new().text("remark", remark.to_string()).part("file", file);

        let resp = self.http.post(&url).multipart(form).send().await?;
        decode(resp).await
    }
}

/// Maps non-2xx responses to [`ApiError::Api`] and parses the body.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            body,
        });
    }

    let body = resp.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
