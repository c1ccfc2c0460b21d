//! In-memory transports for tests.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use saiblo_api::ApiError;
use saiblo_protocol::{
    CodeVersion, CompileNotification, CompileStatus, CreateEntityRequest, Entity, EntityId, Game,
    GameId, Language, User,
};
use saiblo_realtime::RealtimeError;

use crate::backend::{BoxFuture, ChannelConnector, CompileChannel, SaibloApi};
use crate::types::SubmitRequest;

/// Shared record of transport calls, in order.
pub(crate) type CallLog = Arc<Mutex<Vec<String>>>;

/// Invocation from the end-to-end scenario: game Foo, AI Bar.
pub(crate) fn request(source_dir: impl AsRef<Path>) -> SubmitRequest {
    SubmitRequest {
        game: "Foo".into(),
        ai_name: "Bar".into(),
        repo: "https://x/y".into(),
        commit: "abc123".into(),
        language: Language::PythonZip,
        source_dir: source_dir.as_ref().to_path_buf(),
    }
}

fn note(version: u32, status: &str) -> CompileNotification {
    CompileNotification {
        version,
        compile_status: status.into(),
        compile_message: None,
        id: None,
    }
}

pub(crate) fn pending(version: u32) -> CompileNotification {
    note(version, "编译中")
}

pub(crate) fn success(version: u32, token: &str) -> CompileNotification {
    CompileNotification {
        id: Some(serde_json::Value::String(token.into())),
        ..note(version, CompileStatus::SUCCESS)
    }
}

pub(crate) fn failure(version: u32, message: &str) -> CompileNotification {
    CompileNotification {
        compile_message: Some(message.into()),
        ..note(version, CompileStatus::FAILURE)
    }
}

/// A code upload received by [`MockApi`].
#[derive(Debug, Clone)]
pub(crate) struct Upload {
    pub entity_id: EntityId,
    pub remark: String,
    pub file_name: String,
    pub archive: Vec<u8>,
}

/// Saiblo API with one game (`Foo`, id 1) and one user (`alice`).
pub(crate) struct MockApi {
    games: Vec<Game>,
    username: String,
    entities: Mutex<Vec<Entity>>,
    uploads: Mutex<Vec<Upload>>,
    next_version: u32,
    fail_profile: bool,
    fail_upload: bool,
    log: CallLog,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            games: vec![
                Game {
                    id: 1,
                    name: "Foo".into(),
                },
                Game {
                    id: 2,
                    name: "Reversi".into(),
                },
            ],
            username: "alice".into(),
            entities: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            next_version: 1,
            fail_profile: false,
            fail_upload: false,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_entity(self, entity: Entity) -> Self {
        self.entities.lock().unwrap().push(entity);
        self
    }

    pub fn with_next_version(mut self, version: u32) -> Self {
        self.next_version = version;
        self
    }

    pub fn failing_profile(mut self) -> Self {
        self.fail_profile = true;
        self
    }

    pub fn failing_upload(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn created_count(&self) -> usize {
        self.calls().iter().filter(|c| c.starts_with("create")).count()
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.uploads.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.log.lock().unwrap().push(call);
    }
}

fn unauthorized() -> ApiError {
    ApiError::Api {
        status: 401,
        body: r#"{"detail":"Invalid token."}"#.into(),
    }
}

impl SaibloApi for MockApi {
    fn list_games(&self) -> BoxFuture<'_, Result<Vec<Game>, ApiError>> {
        self.record("games".into());
        let games = self.games.clone();
        Box::pin(async move { Ok(games) })
    }

    fn profile(&self) -> BoxFuture<'_, Result<User, ApiError>> {
        self.record("profile".into());
        let result = if self.fail_profile {
            Err(unauthorized())
        } else {
            Ok(User {
                username: self.username.clone(),
            })
        };
        Box::pin(async move { result })
    }

    fn list_entities<'a>(
        &'a self,
        username: &'a str,
        game_id: GameId,
    ) -> BoxFuture<'a, Result<Vec<Entity>, ApiError>> {
        self.record(format!("entities {username} {game_id}"));
        let entities = self.entities.lock().unwrap().clone();
        Box::pin(async move { Ok(entities) })
    }

    fn create_entity<'a>(
        &'a self,
        username: &'a str,
        game_id: GameId,
        req: &'a CreateEntityRequest,
    ) -> BoxFuture<'a, Result<Entity, ApiError>> {
        self.record(format!("create {username} {game_id} {}", req.name));
        let mut entities = self.entities.lock().unwrap();
        let entity = Entity {
            id: 100 + entities.len() as EntityId,
            name: req.name.clone(),
            language: req.language.to_string(),
            repo: req.repo.clone(),
        };
        entities.push(entity.clone());
        Box::pin(async move { Ok(entity) })
    }

    fn upload_code<'a>(
        &'a self,
        entity_id: EntityId,
        remark: &'a str,
        file_name: &'a str,
        archive: Vec<u8>,
    ) -> BoxFuture<'a, Result<CodeVersion, ApiError>> {
        self.record(format!("upload {entity_id} {remark} {file_name}"));
        if self.fail_upload {
            return Box::pin(async { Err(unauthorized()) });
        }
        self.uploads.lock().unwrap().push(Upload {
            entity_id,
            remark: remark.into(),
            file_name: file_name.into(),
            archive,
        });
        let version = self.next_version;
        Box::pin(async move {
            Ok(CodeVersion {
                version,
                remark: remark.into(),
            })
        })
    }
}

/// Realtime channel replaying a fixed list of notifications.
///
/// When the list runs out it reports a closed connection, or never
/// returns if built with [`MockChannel::hang_when_empty`].
pub(crate) struct MockChannel {
    log: CallLog,
    frames: VecDeque<CompileNotification>,
    hang: bool,
}

impl MockChannel {
    pub fn new(log: CallLog, frames: Vec<CompileNotification>) -> Self {
        Self {
            log,
            frames: frames.into(),
            hang: false,
        }
    }

    pub fn hang_when_empty(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl CompileChannel for MockChannel {
    fn announce(&mut self, entity_id: EntityId) -> BoxFuture<'_, Result<(), RealtimeError>> {
        self.log.lock().unwrap().push(format!("announce {entity_id}"));
        Box::pin(async { Ok(()) })
    }

    fn next_notification(&mut self) -> BoxFuture<'_, Result<CompileNotification, RealtimeError>> {
        let next = self.frames.pop_front();
        let hang = self.hang;
        Box::pin(async move {
            match next {
                Some(note) => Ok(note),
                None if hang => std::future::pending().await,
                None => Err(RealtimeError::Closed),
            }
        })
    }

    fn close(self: Box<Self>) -> BoxFuture<'static, ()> {
        self.log.lock().unwrap().push("close".into());
        Box::pin(async {})
    }
}

/// Hands out one prepared [`MockChannel`].
pub(crate) struct MockConnector {
    channel: Mutex<Option<MockChannel>>,
    log: CallLog,
}

impl MockConnector {
    pub fn new(channel: MockChannel) -> Self {
        let log = channel.log.clone();
        Self {
            channel: Mutex::new(Some(channel)),
            log,
        }
    }
}

impl ChannelConnector for MockConnector {
    fn connect(&self) -> BoxFuture<'_, Result<Box<dyn CompileChannel>, RealtimeError>> {
        self.log.lock().unwrap().push("connect".into());
        let channel = self.channel.lock().unwrap().take();
        Box::pin(async move {
            channel
                .map(|c| Box::new(c) as Box<dyn CompileChannel>)
                .ok_or(RealtimeError::Closed)
        })
    }
}
