//! Shared data model for the search layer.

mod collection;
mod document;
mod filter;
mod health;
mod job;
mod result;
mod user;
mod vector;
mod weights;

pub use collection::{CollectionSpec, Distance};
pub use document::{AccessLevel, ChunkPayload, Document};
pub use filter::{Condition, Filter};
pub use health::{HealthReport, HealthStatus, SubsystemHealth};
pub use job::{Job, JobStatus};
pub use result::{ScoreBreakdown, ScoredResult, SearchOutcome};
pub use user::{Role, UserContext};
pub use vector::{PayloadPatch, PointVectors, QueryVector, ScoredPoint, SignalKind, SparseVector, StoredPoint, UpsertPoint};
pub use weights::{WeightOverrides, WeightProfile};
