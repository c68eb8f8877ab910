use async_trait::async_trait;

use crate::errors::VortexResult;
use crate::models::{
    CollectionSpec, Filter, PayloadPatch, QueryVector, ScoredPoint, SignalKind, StoredPoint,
    UpsertPoint,
};

/// The external vector database, reduced to the operations this layer needs:
/// similarity search per vector slot, payload filtering, and point
/// upsert/delete by id. Index internals stay on the other side of this seam.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the collection if it does not exist yet.
    async fn ensure_collection(&self, spec: &CollectionSpec) -> VortexResult<()>;

    /// Similarity search against one named vector slot.
    async fn search(
        &self,
        collection: &str,
        signal: SignalKind,
        query: &QueryVector,
        limit: usize,
        filter: Option<&Filter>,
    ) -> VortexResult<Vec<ScoredPoint>>;

    /// Fetch points by id.
    async fn retrieve(&self, collection: &str, ids: &[String]) -> VortexResult<Vec<StoredPoint>>;

    /// List points matching a filter, up to `limit`.
    async fn scroll(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> VortexResult<Vec<StoredPoint>>;

    /// Insert-or-replace points by id.
    async fn upsert(&self, collection: &str, points: Vec<UpsertPoint>) -> VortexResult<()>;

    /// Delete points matching a filter. Returns the number removed.
    async fn delete(&self, collection: &str, filter: &Filter) -> VortexResult<usize>;

    /// Apply a payload patch to every point matching the filter in one
    /// all-or-nothing call. Returns the number of points updated.
    async fn set_payload(
        &self,
        collection: &str,
        filter: &Filter,
        patch: &PayloadPatch,
    ) -> VortexResult<usize>;

    /// Cheap reachability probe for health reporting.
    async fn healthy(&self) -> bool;
}
