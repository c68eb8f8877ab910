//! Adaptive weight selection.
//!
//! Two layers produce a [`WeightProfile`]: deterministic heuristics keyed on
//! query shape, and an epsilon-greedy bandit over a fixed set of named
//! strategies. Explicit config overrides win over both, field by field.

mod bandit;

pub use bandit::{EpsilonGreedy, RewardTracker};

use std::sync::Arc;

use tracing::debug;

use vortex_core::models::{WeightOverrides, WeightProfile};

/// Keyword markers selecting the administrative-lookup profile.
const ADMIN_KEYWORDS: &[&str] = &[
    "졸업", "요건", "학사", "수강", "등록금", "장학", "graduation", "requirement", "enrollment",
    "tuition", "scholarship", "deadline",
];

/// Keyword markers selecting the research/topical profile.
const RESEARCH_KEYWORDS: &[&str] = &[
    "연구", "논문", "교수", "research", "paper", "publication", "lab", "professor",
];

/// Profile chosen by the deterministic heuristic layer.
pub fn heuristic_profile(query: &str) -> WeightProfile {
    let lower = query.to_lowercase();
    if ADMIN_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return bandit::strategy("admin_lookup");
    }
    if RESEARCH_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return bandit::strategy("research_topics");
    }

    let word_count = query.split_whitespace().count();
    if word_count <= 3 {
        // Short keyword-like queries lean on lexical matching and titles.
        return WeightProfile::named("keyword", 0.3, 0.5, 0.2, 0.3, 60);
    }
    if word_count >= 8 {
        // Long natural-language queries favor dense + learned-sparse.
        return WeightProfile::named("descriptive", 0.6, 0.15, 0.25, 0.1, 80);
    }
    if lower.contains('?') || lower.contains("how") || lower.contains("why") {
        return WeightProfile::named("question", 0.6, 0.1, 0.3, 0.1, 60);
    }
    WeightProfile::balanced()
}

/// Resolves the weight profile for each query.
pub struct WeightSelector {
    bandit: EpsilonGreedy,
    tracker: Arc<RewardTracker>,
    use_bandit: bool,
}

impl WeightSelector {
    pub fn new(use_bandit: bool, epsilon: f64, tracker: Arc<RewardTracker>) -> Self {
        Self {
            bandit: EpsilonGreedy::new(epsilon),
            tracker,
            use_bandit,
        }
    }

    pub fn tracker(&self) -> &Arc<RewardTracker> {
        &self.tracker
    }

    /// Select a profile for this query. Bandit when enabled, heuristics
    /// otherwise; explicit overrides always win field by field.
    pub fn select(&self, query: &str, overrides: &WeightOverrides) -> WeightProfile {
        let base = if self.use_bandit {
            self.bandit.select(&self.tracker)
        } else {
            heuristic_profile(query)
        };
        let profile = overrides.apply(base);
        debug!(strategy = %profile.name, search_k = profile.search_k, "weight profile selected");
        profile
    }
}
