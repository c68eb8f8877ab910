//! # vortex-retrieval
//!
//! The query-serving pipeline: adaptive weight selection, concurrent
//! multi-signal retrieval, score fusion, temporal re-weighting, optional
//! cross-encoder rerank, and the orchestrator that sequences it all behind
//! the cache and the access-control gate.

pub mod engine;
pub mod fusion;
pub mod query;
pub mod rerank;
pub mod search;
pub mod temporal;
pub mod weights;

pub use engine::{SearchOrchestrator, SearchRequest};
pub use weights::{RewardTracker, WeightSelector};
