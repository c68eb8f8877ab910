//! # vortex-ingest
//!
//! Turns raw scraped JSON into typed documents, splits them into chunks, and
//! upserts them under deterministic ids. Because `db_id` is a pure function
//! of document content and chunk point ids derive from `(db_id, index)`,
//! re-ingesting identical content is a no-op upsert, never a duplicate.

mod chunking;
mod manager;
mod normalize;

pub use chunking::chunk_text;
pub use manager::IngestManager;
pub use normalize::normalize_document;
