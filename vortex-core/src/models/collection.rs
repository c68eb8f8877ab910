use serde::{Deserialize, Serialize};

/// Distance metric for the dense vector slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    Cosine,
    Dot,
    Euclid,
}

/// Vector schema of a named collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSpec {
    pub name: String,
    pub dense_dim: usize,
    pub distance: Distance,
    /// Named sparse vector slots, e.g. `["sparse", "splade"]`.
    pub sparse_slots: Vec<String>,
}

impl CollectionSpec {
    /// Standard schema used by the ingest pipeline: one dense slot, one
    /// title slot sharing the dense space, and BM25 + SPLADE sparse slots.
    pub fn standard(name: &str, dense_dim: usize) -> Self {
        Self {
            name: name.to_string(),
            dense_dim,
            distance: Distance::Cosine,
            sparse_slots: vec!["sparse".to_string(), "splade".to_string()],
        }
    }
}
