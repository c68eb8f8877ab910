use serde::{Deserialize, Serialize};

use super::document::ChunkPayload;

/// Per-signal score contributions for one ranked document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub dense: f64,
    pub sparse: f64,
    pub splade: f64,
    pub title: f64,
    /// Fused score before temporal/rerank post-processing.
    pub fused: f64,
    pub recency: Option<f64>,
    pub rerank: Option<f64>,
}

/// One ranked search result at document granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    pub doc_id: String,
    pub title: String,
    pub snippet: String,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub payload: ChunkPayload,
}

/// Outcome of a full search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub results: Vec<ScoredResult>,
    /// Set when every retrieval signal failed and the result set is empty
    /// for operational rather than relevance reasons.
    pub degraded: bool,
    /// Name of the weight strategy that produced this ranking, echoed so
    /// feedback can credit the right strategy.
    pub strategy: String,
    pub cache_hit: bool,
}

impl SearchOutcome {
    pub fn degraded(strategy: &str) -> Self {
        Self {
            results: Vec::new(),
            degraded: true,
            strategy: strategy.to_string(),
            cache_hit: false,
        }
    }
}
