//! Transport traits and their production implementations.
//!
//! The upload flow only sees [`SaibloApi`] and [`CompileChannel`]. The
//! binary wires in `saiblo_api::Client` and `saiblo_realtime::RealtimeClient`;
//! tests wire in mocks.

use std::future::Future;
use std::pin::Pin;

use saiblo_api::{ApiError, Client};
use saiblo_protocol::{
    CodeVersion, CompileNotification, CreateEntityRequest, Credential, Entity, EntityId, Game,
    GameId, User,
};
use saiblo_realtime::{RealtimeClient, RealtimeError};

/// Boxed future returned by the transport traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Request/response channel to the Saiblo REST API.
pub trait SaibloApi: Send + Sync {
    fn list_games(&self) -> BoxFuture<'_, Result<Vec<Game>, ApiError>>;

    fn profile(&self) -> BoxFuture<'_, Result<User, ApiError>>;

    fn list_entities<'a>(
        &'a self,
        username: &'a str,
        game_id: GameId,
    ) -> BoxFuture<'a, Result<Vec<Entity>, ApiError>>;

    fn create_entity<'a>(
        &'a self,
        username: &'a str,
        game_id: GameId,
        req: &'a CreateEntityRequest,
    ) -> BoxFuture<'a, Result<Entity, ApiError>>;

    fn upload_code<'a>(
        &'a self,
        entity_id: EntityId,
        remark: &'a str,
        file_name: &'a str,
        archive: Vec<u8>,
    ) -> BoxFuture<'a, Result<CodeVersion, ApiError>>;
}

impl SaibloApi for Client {
    fn list_games(&self) -> BoxFuture<'_, Result<Vec<Game>, ApiError>> {
        Box::pin(Client::list_games(self))
    }

    fn profile(&self) -> BoxFuture<'_, Result<User, ApiError>> {
        Box::pin(Client::profile(self))
    }

    fn list_entities<'a>(
        &'a self,
        username: &'a str,
        game_id: GameId,
    ) -> BoxFuture<'a, Result<Vec<Entity>, ApiError>> {
        Box::pin(Client::list_entities(self, username, game_id))
    }

    fn create_entity<'a>(
        &'a self,
        username: &'a str,
        game_id: GameId,
        req: &'a CreateEntityRequest,
    ) -> BoxFuture<'a, Result<Entity, ApiError>> {
        Box::pin(Client::create_entity(self, username, game_id, req))
    }

    fn upload_code<'a>(
        &'a self,
        entity_id: EntityId,
        remark: &'a str,
        file_name: &'a str,
        archive: Vec<u8>,
    ) -> BoxFuture<'a, Result<CodeVersion, ApiError>> {
        Box::pin(Client::upload_code(self, entity_id, remark, file_name, archive))
    }
}

/// Push channel that delivers compile notifications.
pub trait CompileChannel: Send {
    /// Declares which entity's submissions this session observes.
    fn announce(&mut self, entity_id: EntityId) -> BoxFuture<'_, Result<(), RealtimeError>>;

    /// Waits for the next notification.
    fn next_notification(&mut self) -> BoxFuture<'_, Result<CompileNotification, RealtimeError>>;

    /// Ends the session.
    fn close(self: Box<Self>) -> BoxFuture<'static, ()>;
}

impl CompileChannel for RealtimeClient {
    fn announce(&mut self, entity_id: EntityId) -> BoxFuture<'_, Result<(), RealtimeError>> {
        Box::pin(RealtimeClient::announce(self, entity_id))
    }

    fn next_notification(&mut self) -> BoxFuture<'_, Result<CompileNotification, RealtimeError>> {
        Box::pin(RealtimeClient::next_notification(self))
    }

    fn close(self: Box<Self>) -> BoxFuture<'static, ()> {
        Box::pin(RealtimeClient::close(*self))
    }
}

/// Opens [`CompileChannel`] sessions.
pub trait ChannelConnector: Send + Sync {
    fn connect(&self) -> BoxFuture<'_, Result<Box<dyn CompileChannel>, RealtimeError>>;
}

/// Connects to the server's `ai` WebSocket endpoint.
#[derive(Debug, Clone)]
pub struct RealtimeConnector {
    ws_base: String,
    credential: Credential,
}

impl RealtimeConnector {
    pub fn new(ws_base: impl Into<String>, credential: Credential) -> Self {
        Self {
            ws_base: ws_base.into(),
            credential,
        }
    }
}

impl ChannelConnector for RealtimeConnector {
    fn connect(&self) -> BoxFuture<'_, Result<Box<dyn CompileChannel>, RealtimeError>> {
        Box::pin(async move {
            let client = RealtimeClient::connect(&self.ws_base, &self.credential).await?;
            Ok(Box::new(client) as Box<dyn CompileChannel>)
        })
    }
}
