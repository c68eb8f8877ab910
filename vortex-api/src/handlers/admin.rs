//! Administrative handlers: security-level updates and epoch bumps.

use tracing::info;
use uuid::Uuid;

use vortex_core::models::Role;

use crate::auth::{resolve_user_context, Credentials};
use crate::error::{ApiError, ErrorCode};
use crate::models::{EpochBumpResponse, SecurityLevelRequest, SecurityLevelResponse};
use crate::state::AppState;

/// Change a document's access level across all of its chunks. Per-document
/// authorization happens inside the level manager (owners and admins of
/// public documents).
pub async fn update_security_level(
    state: &AppState,
    credentials: &Credentials,
    request: SecurityLevelRequest,
) -> Result<SecurityLevelResponse, ApiError> {
    let correlation_id = Uuid::new_v4();
    let user = resolve_user_context(credentials, &state.config.security)
        .map_err(|e| ApiError::from_vortex(e.into(), correlation_id))?;

    let chunks_updated = state
        .security_level_manager()
        .update_security_level(&request.collection, &request.doc_id, request.new_level, &user)
        .await
        .map_err(|e| ApiError::from_vortex(e, correlation_id))?;

    // A metadata write invalidates cached rankings for the collection.
    state.cache.epochs().bump(&request.collection);

    Ok(SecurityLevelResponse {
        doc_id: request.doc_id,
        new_level: request.new_level,
        chunks_updated,
    })
}

/// Explicit administrative cache invalidation for one collection.
pub async fn bump_epoch(
    state: &AppState,
    credentials: &Credentials,
    collection: &str,
) -> Result<EpochBumpResponse, ApiError> {
    let correlation_id = Uuid::new_v4();
    let user = resolve_user_context(credentials, &state.config.security)
        .map_err(|e| ApiError::from_vortex(e.into(), correlation_id))?;
    if user.role != Role::Admin {
        return Err(ApiError::new(
            ErrorCode::Forbidden,
            "epoch bumps require an admin role",
            correlation_id,
        ));
    }

    let epoch = state.cache.epochs().bump(collection);
    info!(collection, epoch, user = %user.user_id, "epoch bumped by admin");
    Ok(EpochBumpResponse {
        collection: collection.to_string(),
        epoch,
    })
}
