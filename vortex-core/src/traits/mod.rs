//! Trait seams to external collaborators and cross-crate services.

mod cache;
mod encoder;
mod queue;
mod store;

pub use cache::SharedCache;
pub use encoder::{CrossEncoder, Encoder};
pub use queue::JobHandler;
pub use store::VectorStore;
