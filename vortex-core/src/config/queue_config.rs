use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults;

/// Job queue configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Number of worker tasks draining the queue.
    pub workers: usize,
    /// Path of the jobs database. `None` keeps jobs in an in-memory database
    /// (tests, ephemeral deployments).
    pub db_path: Option<PathBuf>,
    /// Queue depth above which health reports degrade.
    pub depth_warning: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            workers: defaults::DEFAULT_QUEUE_WORKERS,
            db_path: None,
            depth_warning: 100,
        }
    }
}
