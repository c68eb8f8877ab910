//! # vortex-queue
//!
//! Asynchronous job queue for bulk ingestion and maintenance work, decoupled
//! from the request path. `enqueue` returns immediately; a fixed pool of
//! worker tasks drains the queue and drives each job through
//! `queued → running → done | failed`. Terminal rows are retained for audit
//! and status queries, and the queue never retries on its own — re-enqueue
//! is the caller's decision (safe, because ingestion upserts are idempotent
//! by content hash).

mod manager;
mod store;
mod worker;

pub use manager::QueueManager;
pub use store::{JobCounts, JobStore};
