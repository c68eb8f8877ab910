//! Security-level updates applied atomically across every chunk of a
//! logical document.

use std::sync::Arc;

use tracing::{info, warn};

use vortex_core::errors::{AccessError, StoreError, VortexResult};
use vortex_core::models::{AccessLevel, Condition, Filter, PayloadPatch, UserContext};
use vortex_core::traits::VectorStore;

use crate::access_control::AccessControlManager;

pub struct SecurityLevelManager {
    store: Arc<dyn VectorStore>,
    access: AccessControlManager,
}

impl SecurityLevelManager {
    pub fn new(store: Arc<dyn VectorStore>, access: AccessControlManager) -> Self {
        Self { store, access }
    }

    /// Points belonging to a logical document: match the point id or the
    /// payload `db_id` (the broader of the two historical lookups).
    fn doc_filter(doc_id: &str) -> Filter {
        Filter::should(vec![
            Condition::MatchStr {
                key: "id".to_string(),
                value: doc_id.to_string(),
            },
            Condition::MatchStr {
                key: "db_id".to_string(),
                value: doc_id.to_string(),
            },
        ])
    }

    /// Change a document's access level on all of its chunks in one
    /// all-or-nothing store call. Any failure leaves the previous level
    /// intact on every chunk; a partial update is a bug, not a state.
    pub async fn update_security_level(
        &self,
        collection: &str,
        doc_id: &str,
        new_level: i64,
        caller: &UserContext,
    ) -> VortexResult<usize> {
        let level = AccessLevel::try_new(new_level)
            .ok_or(AccessError::InvalidLevel { level: new_level })?;

        let filter = Self::doc_filter(doc_id);
        let existing = self.store.scroll(collection, &filter, 1).await?;
        let point = existing.first().ok_or_else(|| StoreError::DocumentNotFound {
            doc_id: doc_id.to_string(),
        })?;

        if !self.access.can_change_security_level(caller, &point.payload) {
            warn!(
                user = %caller.user_id,
                doc_id,
                "denied security level change"
            );
            return Err(AccessError::LevelChangeForbidden {
                user_id: caller.user_id.clone(),
                doc_id: doc_id.to_string(),
            }
            .into());
        }

        let updated = self
            .store
            .set_payload(collection, &filter, &PayloadPatch::access_level(level))
            .await?;

        info!(
            user = %caller.user_id,
            doc_id,
            level = %level,
            chunks = updated,
            "security level updated"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::{chunk_payload, MemoryVectorStore};
    use vortex_core::models::{PointVectors, Role, UpsertPoint};
    use vortex_core::VortexError;

    async fn store_with_chunks(db_id: &str, tenant: &str, chunks: usize) -> Arc<MemoryVectorStore> {
        let store = Arc::new(MemoryVectorStore::new());
        let points = (0..chunks)
            .map(|i| {
                let mut payload = chunk_payload(db_id, tenant, 2);
                payload.chunk_index = i;
                UpsertPoint {
                    id: vortex_core::ids::point_id(db_id, i),
                    vectors: PointVectors::default(),
                    payload,
                }
            })
            .collect();
        store.upsert("docs", points).await.unwrap();
        store
    }

    #[tokio::test]
    async fn updates_every_chunk_in_one_call() {
        let store = store_with_chunks("doc-1", "public", 3).await;
        let manager = SecurityLevelManager::new(store.clone(), AccessControlManager::new());
        let admin = UserContext::new("root", Role::Admin);

        let updated = manager
            .update_security_level("docs", "doc-1", 3, &admin)
            .await
            .unwrap();
        assert_eq!(updated, 3);
        assert_eq!(store.levels_for("docs", "doc-1"), vec![3, 3, 3]);
    }

    #[tokio::test]
    async fn forced_failure_leaves_all_chunks_at_prior_level() {
        let store = store_with_chunks("doc-1", "public", 3).await;
        store.set_fail_set_payload(true);
        let manager = SecurityLevelManager::new(store.clone(), AccessControlManager::new());
        let admin = UserContext::new("root", Role::Admin);

        let err = manager
            .update_security_level("docs", "doc-1", 3, &admin)
            .await
            .unwrap_err();
        assert!(matches!(err, VortexError::Store(_)));
        assert_eq!(store.levels_for("docs", "doc-1"), vec![2, 2, 2]);
    }

    #[tokio::test]
    async fn out_of_range_level_is_rejected_before_lookup() {
        let store = store_with_chunks("doc-1", "public", 1).await;
        let manager = SecurityLevelManager::new(store, AccessControlManager::new());
        let admin = UserContext::new("root", Role::Admin);

        for bad in [0, 5, -1] {
            let err = manager
                .update_security_level("docs", "doc-1", bad, &admin)
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                VortexError::Access(AccessError::InvalidLevel { .. })
            ));
        }
    }

    #[tokio::test]
    async fn unauthorized_caller_is_denied() {
        let store = store_with_chunks("doc-1", "public", 2).await;
        let manager = SecurityLevelManager::new(store.clone(), AccessControlManager::new());
        let viewer = UserContext::new("mallory", Role::Viewer);

        let err = manager
            .update_security_level("docs", "doc-1", 1, &viewer)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VortexError::Access(AccessError::LevelChangeForbidden { .. })
        ));
        assert_eq!(store.levels_for("docs", "doc-1"), vec![2, 2]);
    }

    #[tokio::test]
    async fn owner_may_change_their_own_document() {
        let store = store_with_chunks("doc-1", "alice", 2).await;
        let manager = SecurityLevelManager::new(store.clone(), AccessControlManager::new());
        let alice = UserContext::new("alice", Role::Viewer);

        let updated = manager
            .update_security_level("docs", "doc-1", 4, &alice)
            .await
            .unwrap();
        assert_eq!(updated, 2);
        assert_eq!(store.levels_for("docs", "doc-1"), vec![4, 4]);
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let store = store_with_chunks("doc-1", "public", 1).await;
        let manager = SecurityLevelManager::new(store, AccessControlManager::new());
        let admin = UserContext::new("root", Role::Admin);

        let err = manager
            .update_security_level("docs", "ghost", 2, &admin)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VortexError::Store(StoreError::DocumentNotFound { .. })
        ));
    }
}
