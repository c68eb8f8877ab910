//! Temporal re-ranking: blends the fused relevance score with an
//! exponential recency decay.
//!
//! `recency = exp(-ln2 · age_days / half_life)`; the blend is
//! `alpha · normalized_score + (1 - alpha) · recency`. Documents without a
//! parseable date get a neutral recency score instead of being excluded.

use chrono::{DateTime, Datelike, Utc};

use vortex_core::constants::NEUTRAL_RECENCY_SCORE;
use vortex_core::models::ScoredResult;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalParams {
    pub alpha: f64,
    pub half_life_days: f64,
}

/// Recency score of a document dated `date`, as of `now`.
pub fn recency_score(date: Option<DateTime<Utc>>, now: DateTime<Utc>, half_life_days: f64) -> f64 {
    match date {
        Some(date) => {
            let age_days = (now - date).num_seconds().max(0) as f64 / 86_400.0;
            (-std::f64::consts::LN_2 * age_days / half_life_days).exp()
        }
        None => NEUTRAL_RECENCY_SCORE,
    }
}

/// Re-weight results in place by recency and re-sort.
pub fn apply_temporal_ranking(results: &mut Vec<ScoredResult>, params: TemporalParams, now: DateTime<Utc>) {
    if results.is_empty() {
        return;
    }
    let min = results.iter().map(|r| r.score).fold(f64::INFINITY, f64::min);
    let max = results
        .iter()
        .map(|r| r.score)
        .fold(f64::NEG_INFINITY, f64::max);
    let spread = max - min;

    for r in results.iter_mut() {
        let norm = if spread < 1e-8 {
            0.5
        } else {
            (r.score - min) / spread
        };
        let recency = recency_score(r.payload.date, now, params.half_life_days);
        r.breakdown.recency = Some(recency);
        r.score = params.alpha * norm + (1.0 - params.alpha) * recency;
    }

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    });
}

/// Hard filter for queries naming an explicit year: keep documents dated in
/// that year. When the filter would empty the list, the unfiltered list is
/// kept instead (zero-result fallback).
pub fn filter_by_year(results: Vec<ScoredResult>, year: i32) -> Vec<ScoredResult> {
    let matching: Vec<ScoredResult> = results
        .iter()
        .filter(|r| r.payload.date.map(|d| d.year() == year).unwrap_or(false))
        .cloned()
        .collect();
    if matching.is_empty() {
        results
    } else {
        matching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use vortex_core::models::ScoreBreakdown;

    fn result(doc_id: &str, score: f64, date: Option<DateTime<Utc>>) -> ScoredResult {
        let mut payload = test_fixtures::chunk_payload(doc_id, "public", 1);
        payload.date = date;
        ScoredResult {
            doc_id: doc_id.to_string(),
            title: "t".to_string(),
            snippet: "s".to_string(),
            score,
            breakdown: ScoreBreakdown::default(),
            payload,
        }
    }

    #[test]
    fn recency_decays_with_half_life() {
        let now = Utc::now();
        let fresh = recency_score(Some(now), now, 365.0);
        let half = recency_score(Some(now - Duration::days(365)), now, 365.0);
        let old = recency_score(Some(now - Duration::days(3650)), now, 365.0);
        assert!((fresh - 1.0).abs() < 1e-6);
        assert!((half - 0.5).abs() < 1e-3);
        assert!(old < 0.01);
    }

    #[test]
    fn undated_documents_get_the_neutral_score() {
        let now = Utc::now();
        assert_eq!(recency_score(None, now, 365.0), NEUTRAL_RECENCY_SCORE);
    }

    #[test]
    fn newer_document_never_scores_lower_under_recency_intent() {
        let now = Utc::now();
        // Identical relevance, only the dates differ.
        let mut results = vec![
            result("old", 0.7, Some(now - Duration::days(2000))),
            result("new", 0.7, Some(now - Duration::days(10))),
        ];
        apply_temporal_ranking(
            &mut results,
            TemporalParams {
                alpha: 0.5,
                half_life_days: 365.0,
            },
            now,
        );
        assert_eq!(results[0].doc_id, "new");
        assert!(results[0].score >= results[1].score);
    }

    #[test]
    fn year_filter_keeps_matches_and_falls_back_when_empty() {
        let date_2023 = "2023-05-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let date_2024 = "2024-05-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let results = vec![
            result("a", 0.9, Some(date_2023)),
            result("b", 0.8, Some(date_2024)),
            result("c", 0.7, None),
        ];

        let filtered = filter_by_year(results.clone(), 2024);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].doc_id, "b");

        // No document from 2021: keep everything rather than returning nothing.
        let fallback = filter_by_year(results, 2021);
        assert_eq!(fallback.len(), 3);
    }
}
