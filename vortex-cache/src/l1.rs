//! L1 in-process cache using moka.
//!
//! TinyLFU admission policy, per-entry TTL. Fastest tier; entries are
//! instance-local and carry the full pre-access-control ranked list.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use vortex_core::models::ScoredResult;

/// L1 result cache. Keys are query-key hashes, values the fused ranked list.
pub struct L1ResultCache {
    cache: Cache<String, Arc<Vec<ScoredResult>>>,
}

impl L1ResultCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    pub fn get(&self, key: &str) -> Option<Arc<Vec<ScoredResult>>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, results: Arc<Vec<ScoredResult>>) {
        self.cache.insert(key, results);
    }

    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
