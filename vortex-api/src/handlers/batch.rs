//! `POST /batch/ingest`, `GET /batch/jobs/status/{id}`, `GET /batch/jobs`

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use vortex_core::constants::MAX_BULK_BATCH_SIZE;
use vortex_core::models::Role;

use crate::auth::{resolve_user_context, Credentials};
use crate::error::{ApiError, ErrorCode};
use crate::models::{BatchIngestRequest, BatchIngestResponse, JobListResponse, JobStatusResponse};
use crate::state::AppState;

/// Ingestion is always asynchronous: validate, enqueue, return the job id.
pub async fn batch_ingest(
    state: &AppState,
    credentials: &Credentials,
    request: BatchIngestRequest,
) -> Result<BatchIngestResponse, ApiError> {
    let correlation_id = Uuid::new_v4();
    let user = resolve_user_context(credentials, &state.config.security)
        .map_err(|e| ApiError::from_vortex(e.into(), correlation_id))?;
    if user.role < Role::Editor {
        return Err(ApiError::new(
            ErrorCode::Forbidden,
            "ingestion requires editor role or a service key",
            correlation_id,
        ));
    }

    if request.collection.trim().is_empty() {
        return Err(ApiError::new(
            ErrorCode::MissingField,
            "collection must not be empty",
            correlation_id,
        ));
    }
    if request.documents.is_empty() {
        return Err(ApiError::new(
            ErrorCode::MissingField,
            "documents must not be empty",
            correlation_id,
        ));
    }
    if request.documents.len() > MAX_BULK_BATCH_SIZE {
        return Err(ApiError::new(
            ErrorCode::OutOfRange,
            format!("at most {MAX_BULK_BATCH_SIZE} documents per batch"),
            correlation_id,
        ));
    }

    let job_id = state
        .queue
        .enqueue(
            "batch_ingest",
            json!({
                "collection": request.collection,
                "documents": request.documents,
                "requested_by": user.user_id,
            }),
        )
        .map_err(|e| ApiError::from_vortex(e, correlation_id))?;

    info!(%job_id, "batch ingest queued");
    Ok(BatchIngestResponse {
        status: "queued".to_string(),
        job_id,
    })
}

pub async fn job_status(state: &AppState, job_id: &str) -> Result<JobStatusResponse, ApiError> {
    let correlation_id = Uuid::new_v4();
    let job = state
        .queue
        .status(job_id)
        .map_err(|e| ApiError::from_vortex(e, correlation_id))?;
    Ok(JobStatusResponse { job })
}

pub async fn list_jobs(state: &AppState, limit: usize) -> Result<JobListResponse, ApiError> {
    let correlation_id = Uuid::new_v4();
    let counts = state
        .queue
        .counts()
        .map_err(|e| ApiError::from_vortex(e, correlation_id))?;
    let jobs = state
        .queue
        .recent(limit.clamp(1, 100))
        .map_err(|e| ApiError::from_vortex(e, correlation_id))?;
    Ok(JobListResponse {
        queued: counts.queued,
        running: counts.running,
        done: counts.done,
        failed: counts.failed,
        jobs,
    })
}
