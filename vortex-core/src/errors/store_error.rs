/// Vector-store backend errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("collection not found: {collection}")]
    CollectionNotFound { collection: String },

    #[error("document not found: {doc_id}")]
    DocumentNotFound { doc_id: String },

    #[error("store request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },
}
