//! Game, user and entity resolution.

use tracing::{debug, info};

use saiblo_protocol::CreateEntityRequest;

use crate::backend::SaibloApi;
use crate::error::SubmitError;
use crate::types::{AiIdentity, SubmitRequest};

/// Resolves the game and user, then finds or creates the entity.
///
/// An existing entity must already carry the requested language and
/// repository; it is never updated. Language is checked first.
pub async fn resolve_identity(
    api: &dyn SaibloApi,
    req: &SubmitRequest,
) -> Result<AiIdentity, SubmitError> {
    let game = api
        .list_games()
        .await?
        .into_iter()
        .find(|g| g.name == req.game)
        .ok_or_else(|| SubmitError::GameNotFound(req.game.clone()))?;
    debug!(game = %game.name, id = game.id, "game resolved");

    let username = api.profile().await?.username;
    debug!(%username, "user resolved");

    let existing = api
        .list_entities(&username, game.id)
        .await?
        .into_iter()
        .find(|e| e.name == req.ai_name);

    let (entity, created) = match existing {
        Some(entity) => {
            let requested = req.language.to_string();
            if entity.language != requested {
                return Err(SubmitError::EntityLanguageConflict {
                    name: entity.name,
                    existing: entity.language,
                    requested,
                });
            }
            if entity.repo != req.repo {
                return Err(SubmitError::EntityRepoConflict {
                    name: entity.name,
                    existing: entity.repo,
                    requested: req.repo.clone(),
                });
            }
            debug!(entity = entity.id, "using existing entity");
            (entity, false)
        }
        None => {
            let create = CreateEntityRequest {
                language: req.language,
                name: req.ai_name.clone(),
                repo: req.repo.clone(),
            };
            let entity = api.create_entity(&username, game.id, &create).await?;
            info!(entity = entity.id, name = %entity.name, "entity created");
            (entity, true)
        }
    };

    Ok(AiIdentity {
        game,
        username,
        entity,
        created,
    })
}
