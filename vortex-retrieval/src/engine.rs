//! SearchOrchestrator: sequences the full request pipeline.
//!
//! normalize → weight profile → cache probe → concurrent fan-out → fusion →
//! temporal → rerank → access filter → cache write. The cache stores the
//! pre-access-control list so entries are reusable across roles; the access
//! filter runs on every request, cache hit or miss.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use vortex_cache::{CacheManager, QueryKey};
use vortex_core::config::{FusionLaw, SearchConfig};
use vortex_core::errors::{SearchError, VortexError, VortexResult};
use vortex_core::models::{Filter, ScoredResult, SearchOutcome, UserContext, WeightProfile};
use vortex_core::traits::{CrossEncoder, Encoder, VectorStore};
use vortex_security::AccessControlManager;

use crate::fusion;
use crate::query::{self, TemporalIntent};
use crate::rerank::RerankEngine;
use crate::search::HybridSearcher;
use crate::temporal::{self, TemporalParams};
use crate::weights::WeightSelector;

/// One search request, as it arrives from the API boundary.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: usize,
    pub collections: Vec<String>,
    pub filter: Option<Filter>,
    /// Debug tooling may skip the cache entirely.
    pub bypass_cache: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, top_k: usize, collections: Vec<String>) -> Self {
        Self {
            query: query.into(),
            top_k,
            collections,
            filter: None,
            bypass_cache: false,
        }
    }
}

pub struct SearchOrchestrator {
    searcher: HybridSearcher,
    rerank: Option<RerankEngine>,
    cache: Arc<CacheManager>,
    selector: WeightSelector,
    access: AccessControlManager,
    config: SearchConfig,
}

impl SearchOrchestrator {
    pub fn new(
        store: Arc<dyn VectorStore>,
        encoder: Arc<dyn Encoder>,
        cross_encoder: Option<Arc<dyn CrossEncoder>>,
        cache: Arc<CacheManager>,
        selector: WeightSelector,
        config: SearchConfig,
    ) -> Self {
        let searcher = HybridSearcher::new(
            store,
            encoder,
            Duration::from_millis(config.signal_timeout_ms),
        );
        let rerank = cross_encoder.map(|ce| RerankEngine::new(ce, config.rerank_top_n));
        Self {
            searcher,
            rerank,
            cache,
            selector,
            access: AccessControlManager::new(),
            config,
        }
    }

    /// Run a search under the overall request timeout. Timing out cancels
    /// in-flight signal and rerank calls.
    pub async fn search(
        &self,
        request: &SearchRequest,
        user: &UserContext,
    ) -> VortexResult<SearchOutcome> {
        let deadline = Duration::from_millis(self.config.request_timeout_ms);
        match tokio::time::timeout(deadline, self.run(request, user)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(SearchError::Timeout {
                millis: self.config.request_timeout_ms,
            }
            .into()),
        }
    }

    async fn run(&self, request: &SearchRequest, user: &UserContext) -> VortexResult<SearchOutcome> {
        // Step 1: normalize and read temporal intent.
        let query = query::normalize_query(&request.query);
        if query.is_empty() {
            return Err(VortexError::Validation("query text is empty".to_string()));
        }
        let intent = query::extract_temporal_intent(&query);
        let use_recency = self.config.temporal.use_recency.unwrap_or(intent.has_recent_intent);

        // Step 2: resolve the weight profile.
        let profile = self.selector.select(&query, &self.config.weights);

        // Step 3: cache probe. Cached lists are pre-access-control, so the
        // filter below still runs on hits.
        let key = QueryKey::build(
            &query,
            request.filter.as_ref(),
            &request.collections,
            self.cache.epochs(),
            &profile.name,
        );
        if !request.bypass_cache {
            if let Some(cached) = self.cache.get(&key) {
                debug!(query = %query, "serving from result cache");
                let filtered = self.access.filter_results(user, cached.as_ref().clone());
                return Ok(self.finish(filtered, request.top_k, &profile, true));
            }
        }

        // Step 4: concurrent fan-out; individual signal failures degrade.
        let gathered = self
            .searcher
            .gather(&query, &request.collections, profile.search_k, request.filter.as_ref())
            .await;
        if gathered.all_primary_failed() {
            warn!(query = %query, "every retrieval signal failed, returning degraded response");
            return Ok(SearchOutcome::degraded(&profile.name));
        }

        // Step 5: fuse, dedup, temporal post-processing, optional rerank.
        let fused = match self.config.fusion {
            FusionLaw::Rrf => fusion::rrf_fuse(&gathered.results, &profile, self.config.rrf_k),
            FusionLaw::WeightedSum => fusion::weighted_fuse(&gathered.results, &profile),
        };
        let mut merged = fusion::dedup_by_document(fused, profile.search_k);

        if let Some(year) = intent.explicit_year {
            merged = temporal::filter_by_year(merged, year);
        }
        let params = self.temporal_params(&intent);
        if use_recency {
            temporal::apply_temporal_ranking(&mut merged, params, Utc::now());
        }

        merged = self.maybe_rerank(&query, merged, use_recency, params).await;

        // Step 6: cache the pre-access-control list.
        if !request.bypass_cache && !merged.is_empty() {
            self.cache.put(&key, Arc::new(merged.clone()));
        }

        // Step 7: access filter on every path, then truncate.
        let filtered = self.access.filter_results(user, merged);
        info!(
            query = %query,
            strategy = %profile.name,
            results = filtered.len().min(request.top_k),
            "search complete"
        );
        Ok(self.finish(filtered, request.top_k, &profile, false))
    }

    fn temporal_params(&self, intent: &TemporalIntent) -> TemporalParams {
        TemporalParams {
            alpha: self.config.temporal.alpha.unwrap_or(intent.alpha),
            half_life_days: self
                .config
                .temporal
                .half_life_days
                .unwrap_or(intent.half_life_days),
        }
    }

    async fn maybe_rerank(
        &self,
        query: &str,
        merged: Vec<ScoredResult>,
        use_recency: bool,
        params: TemporalParams,
    ) -> Vec<ScoredResult> {
        let Some(rerank) = &self.rerank else {
            return merged;
        };
        if !self.config.rerank_enabled {
            return merged;
        }
        // Confidence triage: a decisive top score makes the second pass
        // redundant (recency re-weighting invalidates that shortcut).
        let top_score = merged.first().map(|r| r.score).unwrap_or(0.0);
        if !use_recency && top_score >= self.config.triage_threshold {
            debug!(top_score, "triage skipped cross-encoder pass");
            return merged;
        }
        let alpha = use_recency.then_some(params.alpha);
        rerank.rerank(query, merged, alpha).await
    }

    fn finish(
        &self,
        mut results: Vec<ScoredResult>,
        top_k: usize,
        profile: &WeightProfile,
        cache_hit: bool,
    ) -> SearchOutcome {
        results.truncate(top_k);
        SearchOutcome {
            results,
            degraded: false,
            strategy: profile.name.clone(),
            cache_hit,
        }
    }
}
