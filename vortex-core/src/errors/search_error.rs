/// Search pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("all retrieval signals failed for query")]
    AllSignalsFailed,

    #[error("signal {signal} failed: {reason}")]
    SignalFailed { signal: String, reason: String },

    #[error("encoding failed: {reason}")]
    EncodingFailed { reason: String },

    #[error("rerank failed: {reason}")]
    RerankFailed { reason: String },

    #[error("request timed out after {millis}ms")]
    Timeout { millis: u64 },
}
