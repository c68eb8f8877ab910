//! # vortex-core
//!
//! Foundation crate for the Vortex hybrid search layer.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod ids;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::VortexConfig;
pub use errors::{VortexError, VortexResult};
pub use models::{
    AccessLevel, ChunkPayload, Document, Job, JobStatus, Role, ScoredResult, UserContext,
    WeightProfile,
};
