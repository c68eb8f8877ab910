//! Optional cross-encoder second pass over the top fused candidates.
//!
//! Any failure — encoder error, empty response — falls back to the
//! pre-rerank order; reranking is an accuracy refinement, never a
//! correctness dependency.

use std::sync::Arc;

use tracing::warn;

use vortex_core::constants::MAX_RERANK_CANDIDATES;
use vortex_core::models::ScoredResult;
use vortex_core::traits::CrossEncoder;

pub struct RerankEngine {
    cross_encoder: Arc<dyn CrossEncoder>,
    top_n: usize,
}

impl RerankEngine {
    pub fn new(cross_encoder: Arc<dyn CrossEncoder>, top_n: usize) -> Self {
        Self {
            cross_encoder,
            top_n: top_n.min(MAX_RERANK_CANDIDATES),
        }
    }

    /// Re-score the top candidates. When recency blending is active,
    /// `recency_alpha` mixes the normalized rerank score with each
    /// document's recency term the same way fusion did.
    pub async fn rerank(
        &self,
        query: &str,
        results: Vec<ScoredResult>,
        recency_alpha: Option<f64>,
    ) -> Vec<ScoredResult> {
        if results.len() < 2 {
            return results;
        }
        let n = self.top_n.min(results.len());
        let passages: Vec<String> = results[..n].iter().map(|r| r.payload.text.clone()).collect();

        let raw_scores = match self.cross_encoder.score(query, &passages).await {
            Ok(scores) if scores.len() == n => scores,
            Ok(_) => {
                warn!("cross-encoder returned a mismatched score count, keeping fused order");
                return results;
            }
            Err(e) => {
                warn!(error = %e, "cross-encoder failed, keeping fused order");
                return results;
            }
        };

        let min = raw_scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = raw_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let spread = max - min;

        let mut results = results;
        let tail = results.split_off(n);
        for (r, raw) in results.iter_mut().zip(raw_scores) {
            let norm = if spread < 1e-8 { 0.5 } else { (raw - min) / spread };
            r.breakdown.rerank = Some(raw);
            r.score = match recency_alpha {
                Some(alpha) => {
                    let recency = r
                        .breakdown
                        .recency
                        .unwrap_or(vortex_core::constants::NEUTRAL_RECENCY_SCORE);
                    alpha * norm + (1.0 - alpha) * recency
                }
                None => raw,
            };
        }

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.doc_id.cmp(&b.doc_id))
        });
        results.extend(tail);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::StubCrossEncoder;
    use vortex_core::models::ScoreBreakdown;

    fn result(doc_id: &str, score: f64, text: &str) -> ScoredResult {
        let mut payload = test_fixtures::chunk_payload(doc_id, "public", 1);
        payload.text = text.to_string();
        ScoredResult {
            doc_id: doc_id.to_string(),
            title: "t".to_string(),
            snippet: text.chars().take(50).collect(),
            score,
            breakdown: ScoreBreakdown::default(),
            payload,
        }
    }

    #[tokio::test]
    async fn reranker_can_reorder_the_top() {
        let engine = RerankEngine::new(Arc::new(StubCrossEncoder::new()), 10);
        // Fused order favors `weak`, but `strong` actually answers the query.
        let results = vec![
            result("weak", 0.9, "completely unrelated text"),
            result("strong", 0.5, "graduation requirements for computer science"),
        ];
        let reranked = engine
            .rerank("graduation requirements", results, None)
            .await;
        assert_eq!(reranked[0].doc_id, "strong");
        assert!(reranked[0].breakdown.rerank.is_some());
    }

    #[tokio::test]
    async fn failure_falls_back_to_fused_order() {
        let cross = Arc::new(StubCrossEncoder::new());
        cross.set_fail(true);
        let engine = RerankEngine::new(cross, 10);
        let results = vec![
            result("first", 0.9, "alpha"),
            result("second", 0.5, "beta"),
        ];
        let reranked = engine.rerank("query", results, None).await;
        assert_eq!(reranked[0].doc_id, "first");
        assert!(reranked[0].breakdown.rerank.is_none());
    }

    #[tokio::test]
    async fn only_top_n_is_rescored() {
        let engine = RerankEngine::new(Arc::new(StubCrossEncoder::new()), 2);
        let results = vec![
            result("a", 0.9, "graduation requirements"),
            result("b", 0.8, "graduation requirements overview"),
            result("c", 0.7, "unrelated tail entry"),
        ];
        let reranked = engine.rerank("graduation requirements", results, None).await;
        assert_eq!(reranked.len(), 3);
        // The tail keeps its fused score and position.
        assert_eq!(reranked[2].doc_id, "c");
        assert!(reranked[2].breakdown.rerank.is_none());
    }
}
