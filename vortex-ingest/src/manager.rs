//! IngestManager: normalize → hash → chunk → encode → idempotent upsert.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use vortex_core::errors::{StoreError, VortexResult};
use vortex_core::ids::point_id;
use vortex_core::models::{
    ChunkPayload, CollectionSpec, Condition, Filter, PointVectors, UpsertPoint, UserContext,
};
use vortex_core::traits::{Encoder, VectorStore};
use vortex_security::AccessControlManager;

use crate::chunking::{chunk_text, DEFAULT_CHUNK_CHARS, DEFAULT_CHUNK_OVERLAP};
use crate::normalize::normalize_document;

pub struct IngestManager {
    store: Arc<dyn VectorStore>,
    encoder: Arc<dyn Encoder>,
    access: AccessControlManager,
    dense_dim: usize,
}

impl IngestManager {
    pub fn new(store: Arc<dyn VectorStore>, encoder: Arc<dyn Encoder>, dense_dim: usize) -> Self {
        Self {
            store,
            encoder,
            access: AccessControlManager::new(),
            dense_dim,
        }
    }

    /// Normalize and index a batch of raw records. Returns the number of
    /// logical documents written. Point ids derive from content, so calling
    /// this twice with the same records rewrites the same points.
    pub async fn upsert_documents(&self, collection: &str, raw_docs: &[Value]) -> VortexResult<usize> {
        self.store
            .ensure_collection(&CollectionSpec::standard(collection, self.dense_dim))
            .await?;

        let mut written = 0;
        for raw in raw_docs {
            let doc = normalize_document(raw)?;
            let chunks = chunk_text(&doc.body, DEFAULT_CHUNK_CHARS, DEFAULT_CHUNK_OVERLAP);
            let title_vector = self.encoder.encode_dense(&doc.title).await?;

            let mut points = Vec::with_capacity(chunks.len());
            for (index, chunk) in chunks.iter().enumerate() {
                let vectors = PointVectors {
                    dense: Some(self.encoder.encode_dense(chunk).await?),
                    title: Some(title_vector.clone()),
                    sparse: Some(self.encoder.encode_sparse(chunk).await?),
                    splade: Some(self.encoder.encode_splade(chunk).await?),
                };
                points.push(UpsertPoint {
                    id: point_id(&doc.db_id, index),
                    vectors,
                    payload: ChunkPayload {
                        db_id: doc.db_id.clone(),
                        chunk_index: index,
                        title: doc.title.clone(),
                        text: chunk.clone(),
                        url: doc.url.clone(),
                        tenant_id: doc.tenant_id.clone(),
                        access_level: doc.access_level,
                        date: doc.date,
                        extra: doc.metadata.clone(),
                    },
                });
            }

            debug!(db_id = %doc.db_id, chunks = points.len(), "upserting document");
            self.store.upsert(collection, points).await?;
            written += 1;
        }

        info!(collection, documents = written, "ingest batch complete");
        Ok(written)
    }

    /// Remove every chunk of a logical document, honoring the mutation rules.
    pub async fn delete_document(
        &self,
        collection: &str,
        db_id: &str,
        caller: &UserContext,
    ) -> VortexResult<usize> {
        let filter = Filter::must(vec![Condition::MatchStr {
            key: "db_id".to_string(),
            value: db_id.to_string(),
        }]);
        let existing = self.store.scroll(collection, &filter, 1).await?;
        let point = existing.first().ok_or_else(|| StoreError::DocumentNotFound {
            doc_id: db_id.to_string(),
        })?;

        if !self.access.can_delete(caller, &point.payload) {
            return Err(vortex_core::errors::AccessError::Denied {
                reason: format!("user {} may not delete {db_id}", caller.user_id),
            }
            .into());
        }

        let removed = self.store.delete(collection, &filter).await?;
        info!(collection, db_id, removed, "document deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_fixtures::{raw_document, MemoryVectorStore, StubEncoder};
    use vortex_core::models::Role;

    fn manager(store: &Arc<MemoryVectorStore>) -> IngestManager {
        IngestManager::new(
            store.clone(),
            Arc::new(StubEncoder::new()),
            test_fixtures::STUB_DENSE_DIM,
        )
    }

    #[tokio::test]
    async fn ingesting_twice_is_idempotent() {
        let store = Arc::new(MemoryVectorStore::new());
        let ingest = manager(&store);
        let docs = vec![raw_document("intro", "hello world"), raw_document("faq", "q and a")];

        ingest.upsert_documents("docs", &docs).await.unwrap();
        let after_first = store.point_count("docs");
        ingest.upsert_documents("docs", &docs).await.unwrap();
        assert_eq!(store.point_count("docs"), after_first);
    }

    #[tokio::test]
    async fn long_documents_split_into_chunks_sharing_db_id() {
        let store = Arc::new(MemoryVectorStore::new());
        let ingest = manager(&store);
        let body = "sentence with several words here ".repeat(200);
        let docs = vec![json!({"title": "long", "content": body})];

        ingest.upsert_documents("docs", &docs).await.unwrap();
        assert!(store.point_count("docs") > 1);
    }

    #[tokio::test]
    async fn owner_deletes_their_document_but_strangers_cannot() {
        let store = Arc::new(MemoryVectorStore::new());
        let ingest = manager(&store);
        let docs = vec![json!({
            "title": "private", "content": "secret notes", "tenant_id": "alice", "access_level": 3
        })];
        ingest.upsert_documents("docs", &docs).await.unwrap();
        let db_id = vortex_core::ids::doc_hash_id(&docs[0]);

        let mallory = UserContext::new("mallory", Role::Viewer);
        assert!(ingest.delete_document("docs", &db_id, &mallory).await.is_err());
        assert_eq!(store.point_count("docs"), 1);

        let alice = UserContext::new("alice", Role::Viewer);
        let removed = ingest.delete_document("docs", &db_id, &alice).await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.point_count("docs"), 0);
    }
}
