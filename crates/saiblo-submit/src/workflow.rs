//! One complete upload run.

use std::time::Duration;

use tracing::info;

use saiblo_archive::{ARCHIVE_FILE_NAME, build_archive};

use crate::backend::{ChannelConnector, SaibloApi};
use crate::coordinator::SubmissionCoordinator;
use crate::error::SubmitError;
use crate::identity::resolve_identity;
use crate::types::{CompiledCode, SubmitRequest};

/// Packs the source directory, resolves the entity, submits the archive
/// and waits for the compile result.
///
/// The temporary archive and the realtime channel are released on every
/// return path.
pub async fn run_upload(
    req: &SubmitRequest,
    api: &dyn SaibloApi,
    connector: &dyn ChannelConnector,
    compile_timeout: Option<Duration>,
) -> Result<CompiledCode, SubmitError> {
    let source_dir = req.source_dir.clone();
    let archive = tokio::task::spawn_blocking(move || build_archive(&source_dir))
        .await
        .map_err(std::io::Error::other)??;
    let bytes = tokio::fs::read(archive.path()).await?;

    let identity = resolve_identity(api, req).await?;
    info!(
        game = %identity.game.name,
        user = %identity.username,
        entity = identity.entity.id,
        "identity resolved"
    );

    let mut channel = connector.connect().await?;
    let result = SubmissionCoordinator::new(api, channel.as_mut(), compile_timeout)
        .submit(identity.entity.id, &req.commit, ARCHIVE_FILE_NAME, bytes)
        .await;
    channel.close().await;

    result
}
