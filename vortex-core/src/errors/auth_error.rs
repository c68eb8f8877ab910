/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing credentials")]
    MissingCredentials,

    #[error("invalid API key")]
    InvalidApiKey,

    #[error("bearer token expired")]
    TokenExpired,

    #[error("malformed bearer claims: {reason}")]
    MalformedClaims { reason: String },
}
