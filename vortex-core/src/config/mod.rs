//! Workspace configuration. Every struct deserializes from TOML with
//! `#[serde(default)]`, so partial config files are always valid.

mod cache_config;
pub mod defaults;
mod pool_config;
mod queue_config;
mod search_config;
mod security_config;

pub use cache_config::CacheConfig;
pub use pool_config::PoolConfig;
pub use queue_config::QueueConfig;
pub use search_config::{FusionLaw, SearchConfig, TemporalConfig};
pub use security_config::SecurityConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{VortexError, VortexResult};

/// Root configuration for the search layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VortexConfig {
    pub search: SearchConfig,
    pub cache: CacheConfig,
    pub pool: PoolConfig,
    pub queue: QueueConfig,
    pub security: SecurityConfig,
}

impl VortexConfig {
    /// Parse from a TOML string.
    pub fn from_toml(raw: &str) -> VortexResult<Self> {
        toml::from_str(raw).map_err(|e| VortexError::Validation(format!("bad config: {e}")))
    }
}
