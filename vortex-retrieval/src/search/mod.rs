//! Concurrent multi-signal fan-out.
//!
//! Each (signal, collection) search runs as its own task bounded by a
//! per-signal timeout. A signal that errors or times out is a soft failure:
//! it contributes an empty list and the remaining signals carry the query.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::warn;

use vortex_core::errors::VortexResult;
use vortex_core::models::{Filter, QueryVector, ScoredPoint, SignalKind};
use vortex_core::traits::{Encoder, VectorStore};

use crate::fusion::SignalResults;

/// Fan-out outcome: per-signal candidates plus which signals soft-failed.
#[derive(Debug, Default)]
pub struct GatherOutcome {
    pub results: SignalResults,
    pub failed: HashSet<SignalKind>,
}

impl GatherOutcome {
    /// True when none of the three primary retrieval signals produced
    /// anything because all of them failed (the degraded-service case).
    pub fn all_primary_failed(&self) -> bool {
        [SignalKind::Dense, SignalKind::Sparse, SignalKind::Splade]
            .iter()
            .all(|k| self.failed.contains(k))
    }
}

pub struct HybridSearcher {
    store: Arc<dyn VectorStore>,
    encoder: Arc<dyn Encoder>,
    signal_timeout: Duration,
}

impl HybridSearcher {
    pub fn new(store: Arc<dyn VectorStore>, encoder: Arc<dyn Encoder>, signal_timeout: Duration) -> Self {
        Self {
            store,
            encoder,
            signal_timeout,
        }
    }

    /// Encode the query per signal and search every requested collection
    /// concurrently.
    pub async fn gather(
        &self,
        query: &str,
        collections: &[String],
        search_k: usize,
        filter: Option<&Filter>,
    ) -> GatherOutcome {
        let mut outcome = GatherOutcome::default();

        // Encoding failures disable the affected signals up front.
        let dense_vec = match self.encoder.encode_dense(query).await {
            Ok(v) => Some(QueryVector::Dense(v)),
            Err(e) => {
                warn!(error = %e, "dense encoding failed, dense+title signals disabled");
                outcome.failed.insert(SignalKind::Dense);
                outcome.failed.insert(SignalKind::Title);
                None
            }
        };
        let sparse_vec = match self.encoder.encode_sparse(query).await {
            Ok(v) => Some(QueryVector::Sparse(v)),
            Err(e) => {
                warn!(error = %e, "sparse encoding failed, sparse signal disabled");
                outcome.failed.insert(SignalKind::Sparse);
                None
            }
        };
        let splade_vec = match self.encoder.encode_splade(query).await {
            Ok(v) => Some(QueryVector::Sparse(v)),
            Err(e) => {
                warn!(error = %e, "splade encoding failed, splade signal disabled");
                outcome.failed.insert(SignalKind::Splade);
                None
            }
        };

        let queries: Vec<(SignalKind, QueryVector)> = [
            (SignalKind::Dense, dense_vec.clone()),
            (SignalKind::Title, dense_vec),
            (SignalKind::Sparse, sparse_vec),
            (SignalKind::Splade, splade_vec),
        ]
        .into_iter()
        .filter_map(|(kind, vector)| vector.map(|v| (kind, v)))
        .collect();

        type SearchTask = (SignalKind, JoinHandle<Option<VortexResult<Vec<ScoredPoint>>>>);
        let mut tasks: Vec<SearchTask> = Vec::new();
        for collection in collections {
            for (kind, vector) in &queries {
                let store = self.store.clone();
                let collection = collection.clone();
                let vector = vector.clone();
                let filter = filter.cloned();
                let timeout = self.signal_timeout;
                let kind = *kind;
                tasks.push((
                    kind,
                    tokio::spawn(async move {
                        tokio::time::timeout(
                            timeout,
                            store.search(&collection, kind, &vector, search_k, filter.as_ref()),
                        )
                        .await
                        .ok()
                    }),
                ));
            }
        }

        // Per-signal success tracking: a signal fails only when no search
        // for it succeeded.
        let mut succeeded: HashSet<SignalKind> = HashSet::new();
        for (kind, task) in tasks {
            match task.await {
                Ok(Some(Ok(hits))) => {
                    succeeded.insert(kind);
                    outcome.results.push(kind, hits);
                }
                Ok(Some(Err(e))) => {
                    warn!(signal = kind.as_str(), error = %e, "signal search failed");
                    outcome.failed.insert(kind);
                }
                Ok(None) => {
                    warn!(signal = kind.as_str(), "signal search timed out");
                    outcome.failed.insert(kind);
                }
                Err(e) => {
                    warn!(signal = kind.as_str(), error = %e, "signal task aborted");
                    outcome.failed.insert(kind);
                }
            }
        }
        for kind in succeeded {
            outcome.failed.remove(&kind);
        }

        outcome
    }
}
