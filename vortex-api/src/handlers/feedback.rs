//! `POST /feedback`

use tracing::info;
use uuid::Uuid;

use crate::auth::{resolve_user_context, Credentials};
use crate::error::{ApiError, ErrorCode};
use crate::feedback::{self, FeedbackSignal};
use crate::models::{FeedbackRequest, FeedbackResponse};
use crate::state::AppState;

/// Credit the strategy that served the query — if the feedback passes the
/// quality gate. Rejected feedback is reported, not recorded.
pub async fn submit_feedback(
    state: &AppState,
    credentials: &Credentials,
    request: FeedbackRequest,
) -> Result<FeedbackResponse, ApiError> {
    let correlation_id = Uuid::new_v4();
    let user = resolve_user_context(credentials, &state.config.security)
        .map_err(|e| ApiError::from_vortex(e.into(), correlation_id))?;

    let Some(reward) = feedback::reward_for_action(&request.action_type) else {
        return Err(ApiError::new(
            ErrorCode::BadRequest,
            format!("unknown action_type: {}", request.action_type),
            correlation_id,
        ));
    };

    let bot_like = request
        .metadata
        .as_ref()
        .and_then(|m| m.get("bot_like"))
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);
    let is_duplicate = request
        .metadata
        .as_ref()
        .and_then(|m| m.get("is_duplicate"))
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);

    let signal = FeedbackSignal {
        dwell_time_secs: request.dwell_time_secs,
        is_duplicate,
        bot_like,
        has_target: request.target_id.is_some(),
    };

    match feedback::validate(&signal) {
        Ok(confidence) => {
            let strategy = request.strategy.as_deref().unwrap_or("balanced");
            state.tracker.add_reward(strategy, reward);
            info!(
                user = %user.user_id,
                strategy,
                reward,
                confidence = confidence.as_str(),
                "feedback recorded"
            );
            Ok(FeedbackResponse {
                recorded: true,
                confidence: Some(confidence.as_str().to_string()),
                reason: None,
            })
        }
        Err(reason) => {
            info!(user = %user.user_id, %reason, "feedback rejected");
            Ok(FeedbackResponse {
                recorded: false,
                confidence: None,
                reason: Some(reason),
            })
        }
    }
}
