//! `POST /query/hybrid`

use tracing::{info, Instrument};
use uuid::Uuid;

use vortex_core::constants::MAX_TOP_K;
use vortex_retrieval::SearchRequest;
use vortex_security::{check_quota, screen_query};

use crate::auth::{resolve_user_context, Credentials};
use crate::error::{ApiError, ErrorCode};
use crate::models::{QueryRequest, QueryResponse};
use crate::state::AppState;

pub async fn query_hybrid(
    state: &AppState,
    credentials: &Credentials,
    request: QueryRequest,
) -> Result<QueryResponse, ApiError> {
    let correlation_id = Uuid::new_v4();
    let span = tracing::info_span!("query_hybrid", %correlation_id);

    async move {
        let user = resolve_user_context(credentials, &state.config.security)
            .map_err(|e| ApiError::from_vortex(e.into(), correlation_id))?;

        // Defense screen before anything touches the query.
        screen_query(&request.query_text)
            .map_err(|e| ApiError::from_vortex(e.into(), correlation_id))?;

        if request.query_text.trim().is_empty() {
            return Err(ApiError::new(
                ErrorCode::MissingField,
                "query_text must not be empty",
                correlation_id,
            ));
        }
        if request.collections.is_empty() {
            return Err(ApiError::new(
                ErrorCode::MissingField,
                "collections must not be empty",
                correlation_id,
            ));
        }
        if request.top_k == 0 || request.top_k > MAX_TOP_K {
            return Err(ApiError::new(
                ErrorCode::OutOfRange,
                format!("top_k must be between 1 and {MAX_TOP_K}"),
                correlation_id,
            ));
        }
        check_quota(&state.config.security, user.role, request.top_k)
            .map_err(|e| ApiError::from_vortex(e.into(), correlation_id))?;

        info!(user = %user.user_id, role = %user.role, query = %request.query_text, "hybrid query");

        let resources = state
            .pool
            .acquire_timeout(std::time::Duration::from_millis(
                state.config.pool.acquire_timeout_ms,
            ))
            .await
            .map_err(|e| ApiError::new(ErrorCode::DependencyFailure, e.to_string(), correlation_id))?;

        let orchestrator = state.orchestrator(&resources);
        let search_request = SearchRequest {
            query: request.query_text,
            top_k: request.top_k,
            collections: request.collections,
            filter: request.filters,
            bypass_cache: request.bypass_cache,
        };
        let outcome = orchestrator
            .search(&search_request, &user)
            .await
            .map_err(|e| ApiError::from_vortex(e, correlation_id))?;

        Ok(QueryResponse::from(outcome))
    }
    .instrument(span)
    .await
}
