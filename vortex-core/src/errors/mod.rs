//! Error taxonomy. One enum per subsystem, aggregated into [`VortexError`].

mod access_error;
mod auth_error;
mod cache_error;
mod queue_error;
mod search_error;
mod store_error;

pub use access_error::AccessError;
pub use auth_error::AuthError;
pub use cache_error::CacheError;
pub use queue_error::QueueError;
pub use search_error::SearchError;
pub use store_error::StoreError;

/// Top-level error for the Vortex workspace.
#[derive(Debug, thiserror::Error)]
pub enum VortexError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type VortexResult<T> = Result<T, VortexError>;
