//! In-memory [`VectorStore`] with deterministic scoring, call counters for
//! cache assertions, and switches to force failures.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use vortex_core::errors::{StoreError, VortexResult};
use vortex_core::models::{
    CollectionSpec, Filter, PayloadPatch, PointVectors, QueryVector, ScoredPoint, SignalKind,
    SparseVector, StoredPoint, UpsertPoint,
};
use vortex_core::traits::VectorStore;

#[derive(Clone)]
struct Record {
    vectors: PointVectors,
    payload: vortex_core::models::ChunkPayload,
}

#[derive(Default)]
struct Collection {
    points: BTreeMap<String, Record>,
}

/// All state behind one mutex so filtered updates are all-or-nothing.
#[derive(Default)]
pub struct MemoryVectorStore {
    collections: Mutex<HashMap<String, Collection>>,
    /// Number of `search` calls served — lets tests verify cache hits by
    /// asserting the fan-out did (not) reach the store.
    pub search_calls: AtomicUsize,
    /// When set, every `search` call errors (degraded-service tests).
    pub fail_search: AtomicBool,
    /// When set, `set_payload` errors before touching any point.
    pub fail_set_payload: AtomicBool,
    /// Health probe answer.
    pub reachable: AtomicBool,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self {
            reachable: AtomicBool::new(true),
            ..Default::default()
        }
    }

    pub fn search_call_count(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn set_fail_search(&self, fail: bool) {
        self.fail_search.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_set_payload(&self, fail: bool) {
        self.fail_set_payload.store(fail, Ordering::SeqCst);
    }

    pub fn set_reachable(&self, up: bool) {
        self.reachable.store(up, Ordering::SeqCst);
    }

    /// All access levels currently stored for a logical document, across its
    /// chunks. Used to assert atomicity of level updates.
    pub fn levels_for(&self, collection: &str, db_id: &str) -> Vec<u8> {
        let guard = self.collections.lock().unwrap();
        guard
            .get(collection)
            .map(|c| {
                c.points
                    .values()
                    .filter(|r| r.payload.db_id == db_id)
                    .map(|r| r.payload.access_level.value())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn point_count(&self, collection: &str) -> usize {
        let guard = self.collections.lock().unwrap();
        guard.get(collection).map(|c| c.points.len()).unwrap_or(0)
    }
}

fn dense_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        (dot / (na * nb)) as f64
    }
}

fn sparse_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let lookup: HashMap<u32, f32> = a.indices.iter().copied().zip(a.values.iter().copied()).collect();
    b.indices
        .iter()
        .zip(b.values.iter())
        .filter_map(|(i, v)| lookup.get(i).map(|w| (w * v) as f64))
        .sum()
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn ensure_collection(&self, spec: &CollectionSpec) -> VortexResult<()> {
        let mut guard = self.collections.lock().unwrap();
        guard.entry(spec.name.clone()).or_default();
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        signal: SignalKind,
        query: &QueryVector,
        limit: usize,
        filter: Option<&Filter>,
    ) -> VortexResult<Vec<ScoredPoint>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_search.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                reason: "forced failure".to_string(),
            }
            .into());
        }

        let guard = self.collections.lock().unwrap();
        let col = guard
            .get(collection)
            .ok_or_else(|| StoreError::CollectionNotFound {
                collection: collection.to_string(),
            })?;

        let mut hits: Vec<ScoredPoint> = col
            .points
            .iter()
            .filter(|(id, r)| filter.map(|f| f.matches(id, &r.payload)).unwrap_or(true))
            .filter_map(|(id, r)| {
                let score = match (signal, query) {
                    (SignalKind::Dense, QueryVector::Dense(q)) => {
                        r.vectors.dense.as_ref().map(|v| dense_similarity(q, v))
                    }
                    (SignalKind::Title, QueryVector::Dense(q)) => {
                        r.vectors.title.as_ref().map(|v| dense_similarity(q, v))
                    }
                    (SignalKind::Sparse, QueryVector::Sparse(q)) => {
                        r.vectors.sparse.as_ref().map(|v| sparse_similarity(q, v))
                    }
                    (SignalKind::Splade, QueryVector::Sparse(q)) => {
                        r.vectors.splade.as_ref().map(|v| sparse_similarity(q, v))
                    }
                    _ => None,
                }?;
                if score <= 0.0 {
                    return None;
                }
                Some(ScoredPoint {
                    id: id.clone(),
                    score,
                    payload: r.payload.clone(),
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(limit);
        Ok(hits)
    }

    async fn retrieve(&self, collection: &str, ids: &[String]) -> VortexResult<Vec<StoredPoint>> {
        let guard = self.collections.lock().unwrap();
        let col = guard
            .get(collection)
            .ok_or_else(|| StoreError::CollectionNotFound {
                collection: collection.to_string(),
            })?;
        Ok(ids
            .iter()
            .filter_map(|id| {
                col.points.get(id).map(|r| StoredPoint {
                    id: id.clone(),
                    payload: r.payload.clone(),
                })
            })
            .collect())
    }

    async fn scroll(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> VortexResult<Vec<StoredPoint>> {
        let guard = self.collections.lock().unwrap();
        let col = guard
            .get(collection)
            .ok_or_else(|| StoreError::CollectionNotFound {
                collection: collection.to_string(),
            })?;
        Ok(col
            .points
            .iter()
            .filter(|(id, r)| filter.matches(id, &r.payload))
            .take(limit)
            .map(|(id, r)| StoredPoint {
                id: id.clone(),
                payload: r.payload.clone(),
            })
            .collect())
    }

    async fn upsert(&self, collection: &str, points: Vec<UpsertPoint>) -> VortexResult<()> {
        let mut guard = self.collections.lock().unwrap();
        let col = guard.entry(collection.to_string()).or_default();
        for p in points {
            col.points.insert(
                p.id,
                Record {
                    vectors: p.vectors,
                    payload: p.payload,
                },
            );
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, filter: &Filter) -> VortexResult<usize> {
        let mut guard = self.collections.lock().unwrap();
        let col = guard
            .get_mut(collection)
            .ok_or_else(|| StoreError::CollectionNotFound {
                collection: collection.to_string(),
            })?;
        let before = col.points.len();
        col.points.retain(|id, r| !filter.matches(id, &r.payload));
        Ok(before - col.points.len())
    }

    async fn set_payload(
        &self,
        collection: &str,
        filter: &Filter,
        patch: &PayloadPatch,
    ) -> VortexResult<usize> {
        if self.fail_set_payload.load(Ordering::SeqCst) {
            return Err(StoreError::RequestFailed {
                reason: "forced payload failure".to_string(),
            }
            .into());
        }
        let mut guard = self.collections.lock().unwrap();
        let col = guard
            .get_mut(collection)
            .ok_or_else(|| StoreError::CollectionNotFound {
                collection: collection.to_string(),
            })?;
        let mut updated = 0;
        for (id, record) in col.points.iter_mut() {
            if !filter.matches(id, &record.payload) {
                continue;
            }
            if let Some(level) = patch.access_level {
                record.payload.access_level = level;
            }
            for (k, v) in &patch.extra {
                record.payload.extra.insert(k.clone(), v.clone());
            }
            updated += 1;
        }
        Ok(updated)
    }

    async fn healthy(&self) -> bool {
        self.reachable.load(Ordering::SeqCst)
    }
}
