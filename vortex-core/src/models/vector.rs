use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::document::{AccessLevel, ChunkPayload};

/// Named retrieval signals. Each maps to a vector slot in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Dense,
    Sparse,
    Splade,
    Title,
}

impl SignalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalKind::Dense => "dense",
            SignalKind::Sparse => "sparse",
            SignalKind::Splade => "splade",
            SignalKind::Title => "title",
        }
    }

    /// The three primary signals plus the title slot.
    pub const ALL: [SignalKind; 4] = [
        SignalKind::Dense,
        SignalKind::Sparse,
        SignalKind::Splade,
        SignalKind::Title,
    ];
}

/// Token-weight vector for BM25 / SPLADE slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    pub indices: Vec<u32>,
    pub values: Vec<f32>,
}

impl SparseVector {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// A query vector for one signal.
#[derive(Debug, Clone)]
pub enum QueryVector {
    Dense(Vec<f32>),
    Sparse(SparseVector),
}

/// Per-slot vectors attached to an upserted point.
#[derive(Debug, Clone, Default)]
pub struct PointVectors {
    pub dense: Option<Vec<f32>>,
    pub title: Option<Vec<f32>>,
    pub sparse: Option<SparseVector>,
    pub splade: Option<SparseVector>,
}

/// A point written to the store.
#[derive(Debug, Clone)]
pub struct UpsertPoint {
    pub id: String,
    pub vectors: PointVectors,
    pub payload: ChunkPayload,
}

/// A point returned from a similarity search, with its raw signal score.
#[derive(Debug, Clone)]
pub struct ScoredPoint {
    pub id: String,
    pub score: f64,
    pub payload: ChunkPayload,
}

/// A point returned from retrieve/scroll (no score attached).
#[derive(Debug, Clone)]
pub struct StoredPoint {
    pub id: String,
    pub payload: ChunkPayload,
}

/// Partial payload update applied through the store's filtered update call.
#[derive(Debug, Clone, Default)]
pub struct PayloadPatch {
    pub access_level: Option<AccessLevel>,
    pub extra: Map<String, Value>,
}

impl PayloadPatch {
    pub fn access_level(level: AccessLevel) -> Self {
        Self {
            access_level: Some(level),
            extra: Map::new(),
        }
    }
}
