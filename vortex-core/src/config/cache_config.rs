use serde::{Deserialize, Serialize};

use super::defaults;

/// Result cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Max entries held by the in-process L1 tier.
    pub l1_capacity: u64,
    pub l1_ttl_secs: u64,
    /// TTL written with every shared-tier entry. Correctness does not depend
    /// on it — stale entries disappear once the epoch moves.
    pub l2_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            l1_capacity: defaults::DEFAULT_L1_CAPACITY,
            l1_ttl_secs: defaults::DEFAULT_L1_TTL_SECS,
            l2_ttl_secs: defaults::DEFAULT_L2_TTL_SECS,
        }
    }
}
