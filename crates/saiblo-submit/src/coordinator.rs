//! Code submission and compile result correlation.
//!
//! The upload goes over the REST API; its outcome comes back on the
//! realtime channel. The channel must be watching the entity before the
//! upload happens, so [`SubmissionCoordinator::upload`] only accepts a
//! [`Subscription`], which only [`SubmissionCoordinator::subscribe`]
//! produces.

use std::time::Duration;

use tracing::{debug, info};

use saiblo_protocol::{CompileStatus, EntityId};

use crate::backend::{CompileChannel, SaibloApi};
use crate::error::SubmitError;
use crate::types::CompiledCode;

/// Proof that the channel announced an entity.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    entity_id: EntityId,
}

impl Subscription {
    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }
}

/// Drives one submission over an API client and an open channel.
pub struct SubmissionCoordinator<'a> {
    api: &'a dyn SaibloApi,
    channel: &'a mut dyn CompileChannel,
    compile_timeout: Option<Duration>,
}

impl<'a> SubmissionCoordinator<'a> {
    /// `compile_timeout` bounds the wait for the compile result; `None`
    /// waits as long as the channel stays open.
    pub fn new(
        api: &'a dyn SaibloApi,
        channel: &'a mut dyn CompileChannel,
        compile_timeout: Option<Duration>,
    ) -> Self {
        Self {
            api,
            channel,
            compile_timeout,
        }
    }

    /// Announces the entity, uploads the archive and waits for its
    /// compile result.
    pub async fn submit(
        &mut self,
        entity_id: EntityId,
        remark: &str,
        file_name: &str,
        archive: Vec<u8>,
    ) -> Result<CompiledCode, SubmitError> {
        let subscription = self.subscribe(entity_id).await?;
        let version = self
            .upload(&subscription, remark, file_name, archive)
            .await?;
        self.await_result(version).await
    }

    pub async fn subscribe(&mut self, entity_id: EntityId) -> Result<Subscription, SubmitError> {
        self.channel.announce(entity_id).await?;
        Ok(Subscription { entity_id })
    }

    /// Uploads the archive as a new code version and returns its number.
    pub async fn upload(
        &self,
        subscription: &Subscription,
        remark: &str,
        file_name: &str,
        archive: Vec<u8>,
    ) -> Result<u32, SubmitError> {
        let bytes = archive.len();
        let code = self
            .api
            .upload_code(subscription.entity_id, remark, file_name, archive)
            .await?;
        info!(
            entity = subscription.entity_id,
            version = code.version,
            bytes,
            "code uploaded"
        );
        Ok(code.version)
    }

    /// Waits for the terminal compile notification of `version`.
    ///
    /// Notifications for other versions and non-terminal states are
    /// skipped.
    pub async fn await_result(&mut self, version: u32) -> Result<CompiledCode, SubmitError> {
        match self.compile_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.wait_for(version))
                .await
                .map_err(|_| SubmitError::Timeout { version, timeout })?,
            None => self.wait_for(version).await,
        }
    }

    async fn wait_for(&mut self, version: u32) -> Result<CompiledCode, SubmitError> {
        loop {
            let note = self.channel.next_notification().await?;
            if note.version != version {
                debug!(
                    expected = version,
                    got = note.version,
                    "skipping notification for another version"
                );
                continue;
            }

            match note.status() {
                CompileStatus::Pending(state) => {
                    debug!(version, %state, "compile in progress");
                }
                CompileStatus::Failure => {
                    return Err(SubmitError::CompileFailed {
                        version,
                        message: note.compile_message.unwrap_or_default(),
                    });
                }
                CompileStatus::Success => {
                    let token = note.token().ok_or_else(|| {
                        SubmitError::Protocol(format!(
                            "compile success for version {version} carries no token"
                        ))
                    })?;
                    info!(version, "compile succeeded");
                    return Ok(CompiledCode { version, token });
                }
            }
        }
    }
}
