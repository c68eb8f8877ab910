/// Authorization errors. Always fail-closed.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("access denied: {reason}")]
    Denied { reason: String },

    #[error("user {user_id} may not change the security level of {doc_id}")]
    LevelChangeForbidden { user_id: String, doc_id: String },

    #[error("invalid access level {level}: must be between 1 and 4")]
    InvalidLevel { level: i64 },

    #[error("query rejected by injection screen: {pattern}")]
    InjectionDetected { pattern: String },

    #[error("quota exceeded for role {role}: requested {requested}, limit {limit}")]
    QuotaExceeded {
        role: String,
        requested: usize,
        limit: usize,
    },
}
