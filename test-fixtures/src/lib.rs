//! Shared test doubles: an in-memory [`VectorStore`], deterministic stub
//! encoders, and corpus builders. Dev-dependency only — nothing here ships.

mod corpus;
mod encoder;
mod store;

pub use corpus::{chunk_payload, document, raw_document};
pub use encoder::{StubCrossEncoder, StubEncoder, STUB_DENSE_DIM};
pub use store::MemoryVectorStore;
