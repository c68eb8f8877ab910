//! QueueManager: non-blocking enqueue + status queries.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use vortex_core::config::QueueConfig;
use vortex_core::errors::{QueueError, VortexResult};
use vortex_core::models::{Job, JobStatus};
use vortex_core::traits::JobHandler;

use crate::store::{JobCounts, JobStore};
use crate::worker::{self, HandlerRegistry};

/// Job types that must not run concurrently with themselves (index
/// retraining and the like).
const EXCLUSIVE_JOB_TYPES: &[&str] = &["index_retrain"];

pub struct QueueManager {
    store: Arc<JobStore>,
    sender: mpsc::UnboundedSender<String>,
}

impl QueueManager {
    /// Open the job store and spawn the worker pool. Must be called from
    /// within a tokio runtime.
    pub fn start(config: &QueueConfig, handlers: Vec<Arc<dyn JobHandler>>) -> VortexResult<Self> {
        let store = Arc::new(JobStore::open(config.db_path.as_deref())?);
        let registry: HandlerRegistry = handlers
            .into_iter()
            .map(|h| (h.job_type().to_string(), h))
            .collect();

        let (sender, receiver) = mpsc::unbounded_channel();
        worker::spawn_workers(config.workers, receiver, store.clone(), Arc::new(registry));
        info!(workers = config.workers, "job queue started");
        Ok(Self { store, sender })
    }

    /// Create a job and hand it to the workers. Returns the job id
    /// immediately; execution happens on the worker pool.
    pub fn enqueue(&self, job_type: &str, payload: Value) -> VortexResult<String> {
        if EXCLUSIVE_JOB_TYPES.contains(&job_type) && self.store.has_active(job_type)? {
            return Err(QueueError::DuplicateActive {
                job_type: job_type.to_string(),
            }
            .into());
        }

        let now = Utc::now();
        let job = Job {
            id: Uuid::new_v4().to_string(),
            job_type: job_type.to_string(),
            payload,
            status: JobStatus::Queued,
            progress: 0.0,
            message: Some("waiting for worker".to_string()),
            created_at: now,
            updated_at: now,
        };
        self.store.insert(&job)?;

        if self.sender.send(job.id.clone()).is_err() {
            // Worker pool is gone; record the failure rather than losing it.
            self.store
                .set_status(&job.id, JobStatus::Failed, Some("dispatch failed"))?;
            return Err(QueueError::DispatchFailed {
                reason: "worker pool unavailable".to_string(),
            }
            .into());
        }

        info!(job_id = %job.id, job_type, "job enqueued");
        Ok(job.id)
    }

    pub fn status(&self, job_id: &str) -> VortexResult<Job> {
        self.store.get(job_id)?.ok_or_else(|| {
            QueueError::JobNotFound {
                job_id: job_id.to_string(),
            }
            .into()
        })
    }

    pub fn recent(&self, limit: usize) -> VortexResult<Vec<Job>> {
        self.store.recent(limit)
    }

    pub fn counts(&self) -> VortexResult<JobCounts> {
        self.store.counts()
    }

    /// Jobs still waiting for a worker (health reporting).
    pub fn depth(&self) -> usize {
        self.store.depth().unwrap_or(0)
    }
}
