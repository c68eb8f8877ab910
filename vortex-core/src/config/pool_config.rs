use serde::{Deserialize, Serialize};

use super::defaults;

/// Resource pool configuration. The size is fixed at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub size: usize,
    pub acquire_timeout_ms: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            size: defaults::DEFAULT_POOL_SIZE,
            acquire_timeout_ms: defaults::DEFAULT_ACQUIRE_TIMEOUT_MS,
        }
    }
}
