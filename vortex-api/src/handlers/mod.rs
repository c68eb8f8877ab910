//! Async handler functions, one per route. The HTTP layer resolves the
//! request body and credentials, then calls straight through.

mod admin;
mod batch;
mod feedback;
mod health;
mod query;

pub use admin::{bump_epoch, update_security_level};
pub use batch::{batch_ingest, job_status, list_jobs};
pub use feedback::submit_feedback;
pub use health::{health, health_status};
pub use query::query_hybrid;
