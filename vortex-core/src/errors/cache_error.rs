/// Cache-tier errors. The cache is fail-open: callers treat these as misses.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("shared cache backend unavailable: {reason}")]
    BackendUnavailable { reason: String },

    #[error("cache entry could not be decoded: {reason}")]
    Corrupt { reason: String },
}
