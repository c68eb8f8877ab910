use async_trait::async_trait;
use serde_json::Value;

use crate::errors::VortexResult;

/// Executes one job type. Handlers are registered with the worker pool by
/// `job_type` and run outside the request path.
#[async_trait]
pub trait JobHandler: Send + Sync {
    fn job_type(&self) -> &str;

    /// Run the job to completion. An `Err` marks the job failed with the
    /// error message; the queue never retries on its own.
    async fn run(&self, payload: &Value) -> VortexResult<()>;
}
