//! Score fusion: merges per-signal candidate lists into one ranking, then
//! collapses chunk hits to document granularity.
//!
//! Two interchangeable laws:
//! - weighted sum over per-query min-max normalized scores;
//! - reciprocal rank fusion, `Σ w_i / (k + rank_i + 1)`, which needs no
//!   normalization and is preferred when raw score scales are incomparable.

use std::collections::HashMap;

use vortex_core::models::{
    ChunkPayload, ScoreBreakdown, ScoredPoint, ScoredResult, SignalKind, WeightProfile,
};

/// Snippet length carried into results.
const SNIPPET_CHARS: usize = 200;

/// Candidate lists returned by the concurrent fan-out, one per signal.
#[derive(Debug, Default)]
pub struct SignalResults {
    pub dense: Vec<ScoredPoint>,
    pub sparse: Vec<ScoredPoint>,
    pub splade: Vec<ScoredPoint>,
    pub title: Vec<ScoredPoint>,
}

impl SignalResults {
    fn signals(&self) -> [(SignalKind, &[ScoredPoint]); 4] {
        [
            (SignalKind::Dense, &self.dense),
            (SignalKind::Sparse, &self.sparse),
            (SignalKind::Splade, &self.splade),
            (SignalKind::Title, &self.title),
        ]
    }

    pub fn push(&mut self, kind: SignalKind, mut hits: Vec<ScoredPoint>) {
        match kind {
            SignalKind::Dense => self.dense.append(&mut hits),
            SignalKind::Sparse => self.sparse.append(&mut hits),
            SignalKind::Splade => self.splade.append(&mut hits),
            SignalKind::Title => self.title.append(&mut hits),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.signals().iter().all(|(_, hits)| hits.is_empty())
    }
}

/// A chunk-level candidate after fusion.
#[derive(Debug, Clone)]
pub struct FusedHit {
    pub point_id: String,
    pub payload: ChunkPayload,
    pub breakdown: ScoreBreakdown,
    pub score: f64,
}

fn weight_for(profile: &WeightProfile, kind: SignalKind) -> f64 {
    match kind {
        SignalKind::Dense => profile.dense,
        SignalKind::Sparse => profile.sparse,
        SignalKind::Splade => profile.splade,
        SignalKind::Title => profile.title,
    }
}

fn breakdown_slot(breakdown: &mut ScoreBreakdown, kind: SignalKind) -> &mut f64 {
    match kind {
        SignalKind::Dense => &mut breakdown.dense,
        SignalKind::Sparse => &mut breakdown.sparse,
        SignalKind::Splade => &mut breakdown.splade,
        SignalKind::Title => &mut breakdown.title,
    }
}

/// Min-max normalize one signal's scores to [0, 1]. When every score is
/// equal there is no spread to exploit, so everything sits at 0.5.
fn normalize_scores(hits: &[ScoredPoint]) -> HashMap<&str, f64> {
    if hits.is_empty() {
        return HashMap::new();
    }
    let min = hits.iter().map(|h| h.score).fold(f64::INFINITY, f64::min);
    let max = hits.iter().map(|h| h.score).fold(f64::NEG_INFINITY, f64::max);
    let spread = max - min;
    hits.iter()
        .map(|h| {
            let norm = if spread < 1e-8 {
                0.5
            } else {
                (h.score - min) / spread
            };
            (h.id.as_str(), norm)
        })
        .collect()
}

/// Weighted-sum fusion. Signals that did not return a document contribute
/// 0 to it, not a penalty.
pub fn weighted_fuse(results: &SignalResults, profile: &WeightProfile) -> Vec<FusedHit> {
    let mut fused: HashMap<String, FusedHit> = HashMap::new();

    for (kind, hits) in results.signals() {
        let weight = weight_for(profile, kind);
        let normalized = normalize_scores(hits);
        for hit in hits {
            let norm = normalized.get(hit.id.as_str()).copied().unwrap_or(0.0);
            let entry = fused.entry(hit.id.clone()).or_insert_with(|| FusedHit {
                point_id: hit.id.clone(),
                payload: hit.payload.clone(),
                breakdown: ScoreBreakdown::default(),
                score: 0.0,
            });
            *breakdown_slot(&mut entry.breakdown, kind) = norm;
            entry.score += weight * norm;
        }
    }

    finalize(fused)
}

/// Reciprocal rank fusion. Documents absent from a signal are simply
/// excluded from that signal's term.
pub fn rrf_fuse(results: &SignalResults, profile: &WeightProfile, rrf_k: u32) -> Vec<FusedHit> {
    let mut fused: HashMap<String, FusedHit> = HashMap::new();

    for (kind, hits) in results.signals() {
        let weight = weight_for(profile, kind);
        for (rank, hit) in hits.iter().enumerate() {
            let contribution = weight / (rrf_k as f64 + rank as f64 + 1.0);
            let entry = fused.entry(hit.id.clone()).or_insert_with(|| FusedHit {
                point_id: hit.id.clone(),
                payload: hit.payload.clone(),
                breakdown: ScoreBreakdown::default(),
                score: 0.0,
            });
            *breakdown_slot(&mut entry.breakdown, kind) = contribution;
            entry.score += contribution;
        }
    }

    finalize(fused)
}

fn finalize(fused: HashMap<String, FusedHit>) -> Vec<FusedHit> {
    let mut hits: Vec<FusedHit> = fused
        .into_values()
        .map(|mut h| {
            h.breakdown.fused = h.score;
            h
        })
        .collect();
    sort_hits(&mut hits);
    hits
}

fn sort_hits(hits: &mut [FusedHit]) {
    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.payload.db_id.cmp(&b.payload.db_id))
    });
}

/// Collapse chunk-level hits to document level: a document matched through
/// several chunks (or several signals) keeps one entry scored by the mean of
/// its chunk scores. The first-seen payload represents the document.
pub fn dedup_by_document(hits: Vec<FusedHit>, limit: usize) -> Vec<ScoredResult> {
    use std::collections::hash_map::Entry;

    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, (Vec<f64>, FusedHit)> = HashMap::new();

    for hit in hits {
        let db_id = hit.payload.db_id.clone();
        match grouped.entry(db_id.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().0.push(hit.score),
            Entry::Vacant(entry) => {
                order.push(db_id);
                entry.insert((vec![hit.score], hit));
            }
        }
    }

    let mut results: Vec<ScoredResult> = order
        .into_iter()
        .filter_map(|db_id| grouped.remove(&db_id))
        .map(|(scores, hit)| {
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            let mut breakdown = hit.breakdown;
            breakdown.fused = mean;
            ScoredResult {
                doc_id: hit.payload.db_id.clone(),
                title: hit.payload.title.clone(),
                snippet: hit.payload.text.chars().take(SNIPPET_CHARS).collect(),
                score: mean,
                breakdown,
                payload: hit.payload,
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    });
    results.truncate(limit);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::chunk_payload;

    fn hit(id: &str, db_id: &str, score: f64) -> ScoredPoint {
        ScoredPoint {
            id: id.to_string(),
            score,
            payload: chunk_payload(db_id, "public", 1),
        }
    }

    fn profile() -> WeightProfile {
        WeightProfile::named("test", 0.5, 0.3, 0.2, 0.0, 60)
    }

    #[test]
    fn weighted_fusion_combines_overlapping_documents() {
        let mut results = SignalResults::default();
        results.push(
            SignalKind::Dense,
            vec![hit("p1", "a", 0.9), hit("p2", "b", 0.1)],
        );
        results.push(
            SignalKind::Sparse,
            vec![hit("p1", "a", 5.0), hit("p3", "c", 1.0)],
        );

        let fused = weighted_fuse(&results, &profile());
        // Document `a` tops both signals: dense norm 1.0 * 0.5 + sparse norm 1.0 * 0.3.
        assert_eq!(fused[0].payload.db_id, "a");
        assert!((fused[0].score - 0.8).abs() < 1e-9);
        // One entry per point, no duplicates.
        assert_eq!(fused.len(), 3);
    }

    #[test]
    fn equal_scores_normalize_to_half() {
        let mut results = SignalResults::default();
        results.push(
            SignalKind::Dense,
            vec![hit("p1", "a", 0.7), hit("p2", "b", 0.7)],
        );
        let fused = weighted_fuse(&results, &profile());
        for f in &fused {
            assert!((f.breakdown.dense - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn missing_signal_contributes_nothing_and_nothing_crashes() {
        // Sparse returned nothing: fusion is dense+splade-only.
        let mut results = SignalResults::default();
        results.push(SignalKind::Dense, vec![hit("p1", "a", 0.9), hit("p2", "b", 0.2)]);
        results.push(SignalKind::Splade, vec![hit("p1", "a", 0.4)]);

        let fused = weighted_fuse(&results, &profile());
        assert_eq!(fused.len(), 2);
        // a: dense norm 1.0 * 0.5 + splade norm 0.5 (single hit) * 0.2.
        assert_eq!(fused[0].payload.db_id, "a");
        assert!((fused[0].score - 0.6).abs() < 1e-9);
        for f in &fused {
            assert_eq!(f.breakdown.sparse, 0.0);
            assert!(f.score.is_finite());
        }
    }

    #[test]
    fn rrf_rewards_agreement_across_signals() {
        let mut results = SignalResults::default();
        results.push(
            SignalKind::Dense,
            vec![hit("p1", "a", 0.9), hit("p2", "b", 0.8)],
        );
        results.push(
            SignalKind::Sparse,
            vec![hit("p1", "a", 3.0), hit("p3", "c", 2.0)],
        );
        let uniform = WeightProfile::named("uniform", 1.0, 1.0, 1.0, 1.0, 60);

        let fused = rrf_fuse(&results, &uniform, 60);
        assert_eq!(fused[0].payload.db_id, "a");
        // Two top-rank contributions: 2 / 61.
        assert!((fused[0].score - 2.0 / 61.0).abs() < 1e-9);
    }

    #[test]
    fn ties_break_by_db_id_for_determinism() {
        let mut results = SignalResults::default();
        results.push(
            SignalKind::Dense,
            vec![hit("p1", "b", 0.5), hit("p2", "a", 0.5)],
        );
        let fused = weighted_fuse(&results, &profile());
        assert_eq!(fused[0].payload.db_id, "a");
        assert_eq!(fused[1].payload.db_id, "b");
    }

    #[test]
    fn dedup_averages_chunks_of_the_same_document() {
        let hits = vec![
            FusedHit {
                point_id: "p1".into(),
                payload: chunk_payload("a", "public", 1),
                breakdown: ScoreBreakdown::default(),
                score: 0.8,
            },
            FusedHit {
                point_id: "p2".into(),
                payload: chunk_payload("a", "public", 1),
                breakdown: ScoreBreakdown::default(),
                score: 0.4,
            },
            FusedHit {
                point_id: "p3".into(),
                payload: chunk_payload("b", "public", 1),
                breakdown: ScoreBreakdown::default(),
                score: 0.5,
            },
        ];
        let results = dedup_by_document(hits, 10);
        assert_eq!(results.len(), 2);
        let a = results.iter().find(|r| r.doc_id == "a").unwrap();
        assert!((a.score - 0.6).abs() < 1e-9);
    }
}
