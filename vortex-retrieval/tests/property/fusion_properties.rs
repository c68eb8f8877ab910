//! Property-style coverage of the fusion and temporal math.

use chrono::{Duration, Utc};
use proptest::prelude::*;

use test_fixtures::chunk_payload;
use vortex_core::models::{ScoredPoint, SignalKind, WeightProfile};
use vortex_retrieval::fusion::{dedup_by_document, rrf_fuse, weighted_fuse, SignalResults};
use vortex_retrieval::temporal::recency_score;

fn arbitrary_hits(count: usize, scores: Vec<f64>) -> Vec<ScoredPoint> {
    scores
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(i, score)| ScoredPoint {
            id: format!("p{i}"),
            score,
            payload: chunk_payload(&format!("doc-{}", i % 5), "public", 1),
        })
        .collect()
}

proptest! {
    #[test]
    fn weighted_fusion_is_sorted_and_finite(
        scores in proptest::collection::vec(0.0f64..100.0, 1..40)
    ) {
        let mut results = SignalResults::default();
        results.push(SignalKind::Dense, arbitrary_hits(scores.len(), scores.clone()));
        results.push(SignalKind::Sparse, arbitrary_hits(scores.len() / 2, scores));

        let fused = weighted_fuse(&results, &WeightProfile::balanced());
        for pair in fused.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for hit in &fused {
            prop_assert!(hit.score.is_finite());
            prop_assert!(hit.breakdown.dense >= 0.0 && hit.breakdown.dense <= 1.0);
        }
    }

    #[test]
    fn rrf_scores_shrink_with_rank(
        count in 2usize..60,
        k in 1u32..200
    ) {
        let scores: Vec<f64> = (0..count).map(|i| 1.0 / (i + 1) as f64).collect();
        let mut results = SignalResults::default();
        results.push(SignalKind::Dense, arbitrary_hits(count, scores));

        let fused = rrf_fuse(&results, &WeightProfile::named("u", 1.0, 1.0, 1.0, 1.0, 60), k);
        // A single signal list keeps its order under RRF.
        for pair in fused.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        prop_assert!(fused[0].score <= 1.0 / (k as f64 + 1.0) + 1e-12);
    }

    #[test]
    fn dedup_never_grows_the_list(
        scores in proptest::collection::vec(0.0f64..10.0, 1..50)
    ) {
        let mut results = SignalResults::default();
        results.push(SignalKind::Dense, arbitrary_hits(scores.len(), scores));
        let fused = weighted_fuse(&results, &WeightProfile::balanced());
        let fused_len = fused.len();

        let deduped = dedup_by_document(fused, 100);
        prop_assert!(deduped.len() <= fused_len);
        // At most one entry per logical document.
        let mut ids: Vec<_> = deduped.iter().map(|r| r.doc_id.clone()).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), deduped.len());
    }

    #[test]
    fn recency_is_bounded_and_monotonic(
        age_a in 0i64..5_000,
        age_b in 0i64..5_000,
        half_life in 1.0f64..2_000.0
    ) {
        let now = Utc::now();
        let score = |age: i64| recency_score(Some(now - Duration::days(age)), now, half_life);
        let (younger, older) = if age_a <= age_b { (age_a, age_b) } else { (age_b, age_a) };
        prop_assert!(score(younger) >= score(older));
        prop_assert!(score(older) > 0.0 && score(younger) <= 1.0 + 1e-12);
    }
}
