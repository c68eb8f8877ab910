//! CacheManager: L1 in front of the shared L2 tier.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use vortex_core::config::CacheConfig;
use vortex_core::models::ScoredResult;
use vortex_core::traits::SharedCache;

use crate::epoch::EpochRegistry;
use crate::key::QueryKey;
use crate::l1::L1ResultCache;

pub struct CacheManager {
    l1: L1ResultCache,
    shared: Arc<dyn SharedCache>,
    epochs: EpochRegistry,
    l2_ttl: Duration,
}

impl CacheManager {
    pub fn new(config: &CacheConfig, shared: Arc<dyn SharedCache>) -> Self {
        Self {
            l1: L1ResultCache::new(config.l1_capacity, Duration::from_secs(config.l1_ttl_secs)),
            epochs: EpochRegistry::new(shared.clone()),
            shared,
            l2_ttl: Duration::from_secs(config.l2_ttl_secs),
        }
    }

    pub fn epochs(&self) -> &EpochRegistry {
        &self.epochs
    }

    /// Look up a ranked list. L1 first, then the shared tier (promoting hits
    /// into L1). Backend or decode problems behave as misses.
    pub fn get(&self, key: &QueryKey) -> Option<Arc<Vec<ScoredResult>>> {
        if let Some(hit) = self.l1.get(key.as_str()) {
            debug!(key = key.as_str(), "cache hit (l1)");
            return Some(hit);
        }
        let raw = self.shared.get(key.as_str())?;
        match serde_json::from_str::<Vec<ScoredResult>>(&raw) {
            Ok(results) => {
                debug!(key = key.as_str(), "cache hit (shared)");
                let results = Arc::new(results);
                self.l1.insert(key.as_str().to_string(), results.clone());
                Some(results)
            }
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "corrupt shared cache entry, treating as miss");
                self.shared.delete(key.as_str());
                None
            }
        }
    }

    /// Store the pre-access-control ranked list in both tiers.
    /// Serialization failures are logged and swallowed — caching is an
    /// optimization, never a request-path failure.
    pub fn put(&self, key: &QueryKey, results: Arc<Vec<ScoredResult>>) {
        self.l1.insert(key.as_str().to_string(), results.clone());
        match serde_json::to_string(results.as_ref()) {
            Ok(raw) => self.shared.set(key.as_str(), raw, self.l2_ttl),
            Err(e) => warn!(error = %e, "failed to serialize results for shared cache"),
        }
    }

    /// Whether the shared backend is reachable (health reporting).
    pub fn shared_healthy(&self) -> bool {
        self.shared.healthy()
    }

    /// Drop the local tier (administrative/debug path).
    pub fn clear_local(&self) {
        self.l1.clear();
    }
}
