//! Worker pool draining the job channel.
//!
//! Workers run on their own tasks so slow bulk ingestion never blocks query
//! latency. Each job transitions `queued → running → done | failed`; failed
//! jobs record a message and are left for the caller to re-enqueue.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use vortex_core::models::JobStatus;
use vortex_core::traits::JobHandler;

use crate::store::JobStore;

pub(crate) type HandlerRegistry = HashMap<String, Arc<dyn JobHandler>>;

/// Spawn `count` worker tasks sharing one receiver.
pub(crate) fn spawn_workers(
    count: usize,
    receiver: UnboundedReceiver<String>,
    store: Arc<JobStore>,
    handlers: Arc<HandlerRegistry>,
) {
    let receiver = Arc::new(Mutex::new(receiver));
    for worker_id in 0..count.max(1) {
        let receiver = receiver.clone();
        let store = store.clone();
        let handlers = handlers.clone();
        tokio::spawn(async move {
            loop {
                let job_id = {
                    let mut rx = receiver.lock().await;
                    rx.recv().await
                };
                let Some(job_id) = job_id else {
                    // Channel closed: queue manager dropped, worker retires.
                    break;
                };
                run_one(worker_id, &job_id, &store, &handlers).await;
            }
        });
    }
}

async fn run_one(worker_id: usize, job_id: &str, store: &JobStore, handlers: &HandlerRegistry) {
    let job = match store.get(job_id) {
        Ok(Some(job)) => job,
        Ok(None) => {
            warn!(worker_id, job_id, "dequeued unknown job id");
            return;
        }
        Err(e) => {
            error!(worker_id, job_id, error = %e, "failed to load job");
            return;
        }
    };

    if let Err(e) = store.set_status(job_id, JobStatus::Running, Some("processing")) {
        error!(job_id, error = %e, "failed to mark job running");
        return;
    }
    info!(worker_id, job_id, job_type = %job.job_type, "job started");

    let outcome = match handlers.get(&job.job_type) {
        Some(handler) => handler.run(&job.payload).await,
        None => Err(vortex_core::errors::QueueError::UnknownJobType {
            job_type: job.job_type.clone(),
        }
        .into()),
    };

    let update = match outcome {
        Ok(()) => {
            let _ = store.set_progress(job_id, 1.0);
            info!(worker_id, job_id, "job done");
            store.set_status(job_id, JobStatus::Done, Some("completed"))
        }
        Err(e) => {
            warn!(worker_id, job_id, error = %e, "job failed");
            store.set_status(job_id, JobStatus::Failed, Some(&e.to_string()))
        }
    };
    if let Err(e) = update {
        error!(job_id, error = %e, "failed to record job outcome");
    }
}
