use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::WeightOverrides;

/// How per-signal candidate lists are merged into one ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionLaw {
    /// Reciprocal rank fusion — preferred when raw score scales are
    /// incomparable across signals.
    Rrf,
    /// Min-max normalized weighted sum of raw scores.
    WeightedSum,
}

/// Temporal ranking overrides. `None` fields defer to query-intent defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    /// Force recency re-weighting on or off regardless of query intent.
    pub use_recency: Option<bool>,
    pub alpha: Option<f64>,
    pub half_life_days: Option<f64>,
}

/// Search pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub fusion: FusionLaw,
    pub rrf_k: u32,
    /// Epsilon-greedy strategy selection; `false` uses the heuristic layer.
    pub use_bandit: bool,
    pub epsilon: f64,
    pub signal_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub rerank_enabled: bool,
    pub rerank_top_n: usize,
    /// Skip the cross-encoder when the top fused score reaches this value.
    pub triage_threshold: f64,
    pub temporal: TemporalConfig,
    /// Explicit weight overrides; win over heuristics and bandit.
    pub weights: WeightOverrides,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fusion: FusionLaw::Rrf,
            rrf_k: defaults::DEFAULT_RRF_K,
            use_bandit: true,
            epsilon: defaults::DEFAULT_EPSILON,
            signal_timeout_ms: defaults::DEFAULT_SIGNAL_TIMEOUT_MS,
            request_timeout_ms: defaults::DEFAULT_REQUEST_TIMEOUT_MS,
            rerank_enabled: true,
            rerank_top_n: defaults::DEFAULT_RERANK_TOP_N,
            triage_threshold: defaults::DEFAULT_TRIAGE_THRESHOLD,
            temporal: TemporalConfig::default(),
            weights: WeightOverrides::default(),
        }
    }
}
