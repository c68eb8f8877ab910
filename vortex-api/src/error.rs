//! Error envelope: stable codes + correlation ids.

use serde::Serialize;
use uuid::Uuid;

use vortex_core::errors::{AccessError, AuthError, QueueError, StoreError, VortexError};

/// Stable machine-readable error codes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    InvalidApiKey,
    TokenExpired,
    BadRequest,
    MissingField,
    OutOfRange,
    NotFound,
    RateLimited,
    QuotaExceeded,
    InjectionDetected,
    AccessDenied,
    DependencyFailure,
    Internal,
}

impl ErrorCode {
    /// HTTP status the outer layer should map this code onto.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorCode::Unauthorized | ErrorCode::InvalidApiKey | ErrorCode::TokenExpired => 401,
            ErrorCode::Forbidden | ErrorCode::AccessDenied | ErrorCode::InjectionDetected => 403,
            ErrorCode::BadRequest | ErrorCode::MissingField | ErrorCode::OutOfRange => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::RateLimited | ErrorCode::QuotaExceeded => 429,
            ErrorCode::DependencyFailure => 502,
            ErrorCode::Internal => 500,
        }
    }
}

/// The error body every failing call returns. The correlation id ties the
/// response to the server-side log line for the same request.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub correlation_id: Uuid,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>, correlation_id: Uuid) -> Self {
        Self {
            code,
            message: message.into(),
            correlation_id,
        }
    }

    /// Map an internal error onto the public taxonomy.
    pub fn from_vortex(err: VortexError, correlation_id: Uuid) -> Self {
        let code = match &err {
            VortexError::Auth(auth) => match auth {
                AuthError::MissingCredentials => ErrorCode::Unauthorized,
                AuthError::InvalidApiKey => ErrorCode::InvalidApiKey,
                AuthError::TokenExpired => ErrorCode::TokenExpired,
                AuthError::MalformedClaims { .. } => ErrorCode::Unauthorized,
            },
            VortexError::Access(access) => match access {
                AccessError::Denied { .. } => ErrorCode::AccessDenied,
                AccessError::LevelChangeForbidden { .. } => ErrorCode::Forbidden,
                AccessError::InvalidLevel { .. } => ErrorCode::OutOfRange,
                AccessError::InjectionDetected { .. } => ErrorCode::InjectionDetected,
                AccessError::QuotaExceeded { .. } => ErrorCode::QuotaExceeded,
            },
            VortexError::Validation(_) => ErrorCode::BadRequest,
            VortexError::Store(store) => match store {
                StoreError::CollectionNotFound { .. } | StoreError::DocumentNotFound { .. } => {
                    ErrorCode::NotFound
                }
                _ => ErrorCode::DependencyFailure,
            },
            VortexError::Search(_) | VortexError::Cache(_) => ErrorCode::DependencyFailure,
            VortexError::Queue(queue) => match queue {
                QueueError::JobNotFound { .. } => ErrorCode::NotFound,
                QueueError::DuplicateActive { .. } => ErrorCode::BadRequest,
                _ => ErrorCode::DependencyFailure,
            },
            VortexError::Internal(_) => ErrorCode::Internal,
        };
        Self::new(code, err.to_string(), correlation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from_vortex(
            StoreError::DocumentNotFound {
                doc_id: "x".into(),
            }
            .into(),
            Uuid::new_v4(),
        );
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.code.http_status(), 404);
    }

    #[test]
    fn store_outage_is_a_dependency_failure_not_a_silent_success() {
        let err = ApiError::from_vortex(
            StoreError::Unavailable {
                reason: "down".into(),
            }
            .into(),
            Uuid::new_v4(),
        );
        assert_eq!(err.code, ErrorCode::DependencyFailure);
        assert_eq!(err.code.http_status(), 502);
    }

    #[test]
    fn auth_and_quota_codes_are_stable() {
        let cid = Uuid::new_v4();
        let expired = ApiError::from_vortex(AuthError::TokenExpired.into(), cid);
        assert_eq!(expired.code, ErrorCode::TokenExpired);
        assert_eq!(expired.correlation_id, cid);

        let quota = ApiError::from_vortex(
            AccessError::QuotaExceeded {
                role: "guest".into(),
                requested: 50,
                limit: 10,
            }
            .into(),
            cid,
        );
        assert_eq!(quota.code, ErrorCode::QuotaExceeded);
        assert_eq!(quota.code.http_status(), 429);
    }
}
