//! WebSocket client for the `ai` notification channel.

use futures_util::{SinkExt, StreamExt};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace};

use saiblo_protocol::{AnnounceMessage, CompileNotification, Credential, EntityId};

/// Production realtime root.
pub const DEFAULT_WS_URL: &str = "wss://api.saiblo.net/ws/";

/// Development realtime root.
pub const DEV_WS_URL: &str = "wss://api.dev.saiblo.net/ws/";

/// Largest frame accepted from the server (1 MB). Notifications are small
/// JSON objects; compile logs are the only part that grows.
const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// Errors from the realtime client.
#[derive(Debug, thiserror::Error)]
pub enum RealtimeError {
    #[error("WebSocket error: {0}")]
    Ws(#[from] tungstenite::Error),

    #[error("invalid notification: {0}")]
    Json(#[from] serde_json::Error),

    #[error("credential contains characters not allowed in a header")]
    InvalidCredential,

    #[error("connection closed")]
    Closed,
}

/// Builds the `ai` channel URL with the credential as `token` parameter.
pub fn channel_url(ws_base: &str, credential: &Credential) -> String {
    let sep = if ws_base.ends_with('/') { "" } else { "/" };
    let authorization = credential.authorization();
    let token = utf8_percent_encode(&authorization, NON_ALPHANUMERIC);
    format!("{ws_base}{sep}ai?token={token}")
}

/// Open connection to the `ai` channel.
///
/// Dropping the client tears the socket down; [`RealtimeClient::close`]
/// additionally performs the closing handshake.
pub struct RealtimeClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl RealtimeClient {
    /// Connects to `{ws_base}ai`, authenticating with both the query
    /// parameter and the `Authorization` header.
    pub async fn connect(ws_base: &str, credential: &Credential) -> Result<Self, RealtimeError> {
        let url = channel_url(ws_base, credential);
        let mut request = url.as_str().into_client_request()?;
        let auth = HeaderValue::from_str(&credential.authorization())
            .map_err(|_| RealtimeError::InvalidCredential)?;
        request.headers_mut().insert(AUTHORIZATION, auth);

        let mut ws_config = tungstenite::protocol::WebSocketConfig::default();
        ws_config.max_message_size = Some(MAX_MESSAGE_SIZE);
        ws_config.max_frame_size = Some(MAX_MESSAGE_SIZE);

        let (stream, _) =
            tokio_tungstenite::connect_async_with_config(request, Some(ws_config), false).await?;
        debug!(base = %ws_base, "realtime channel connected");

        Ok(Self { stream })
    }

    /// Tells the server which entity's submissions to report.
    pub async fn announce(&mut self, entity_id: EntityId) -> Result<(), RealtimeError> {
        let json = serde_json::to_string(&AnnounceMessage { entity: entity_id })?;
        self.stream
            .send(tungstenite::Message::Text(json.into()))
            .await?;
        debug!(entity = entity_id, "entity announced");
        Ok(())
    }

    /// Waits for the next text frame.
    ///
    /// Pings are answered by tungstenite while reading; binary frames and
    /// pongs are skipped. A close frame or end of stream is
    /// [`RealtimeError::Closed`].
    pub async fn next_text(&mut self) -> Result<String, RealtimeError> {
        loop {
            match self.stream.next().await {
                Some(Ok(tungstenite::Message::Text(text))) => {
                    trace!(len = text.len(), "received text frame");
                    return Ok(text.to_string());
                }
                Some(Ok(tungstenite::Message::Close(frame))) => {
                    debug!(?frame, "server closed realtime channel");
                    return Err(RealtimeError::Closed);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Err(RealtimeError::Closed),
            }
        }
    }

    /// Waits for the next frame and parses it as a compile notification.
    pub async fn next_notification(&mut self) -> Result<CompileNotification, RealtimeError> {
        let text = self.next_text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Performs the closing handshake.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.close(None).await {
            debug!("realtime close failed: {e}");
        }
    }
}
