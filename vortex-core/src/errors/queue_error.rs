/// Job queue errors.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("job not found: {job_id}")]
    JobNotFound { job_id: String },

    #[error("job type {job_type} already queued or running")]
    DuplicateActive { job_type: String },

    #[error("unknown job type: {job_type}")]
    UnknownJobType { job_type: String },

    #[error("dispatch failed: {reason}")]
    DispatchFailed { reason: String },
}
