//! Fusion hot-path benchmarks: weighted-sum vs RRF over realistic
//! candidate-list sizes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vortex_core::models::{ScoredPoint, SignalKind, WeightProfile};
use vortex_retrieval::fusion::{dedup_by_document, rrf_fuse, weighted_fuse, SignalResults};

fn candidates(signal: &str, count: usize, doc_count: usize) -> Vec<ScoredPoint> {
    (0..count)
        .map(|i| {
            let db_id = format!("doc-{}", i % doc_count);
            let mut payload = test_fixtures::chunk_payload(&db_id, "public", 1);
            payload.chunk_index = i;
            ScoredPoint {
                id: format!("{signal}-p{i}"),
                score: 1.0 / (i as f64 + 1.0),
                payload,
            }
        })
        .collect()
}

fn build_results(per_signal: usize) -> SignalResults {
    let mut results = SignalResults::default();
    results.push(SignalKind::Dense, candidates("dense", per_signal, per_signal / 2));
    results.push(SignalKind::Sparse, candidates("sparse", per_signal, per_signal / 2));
    results.push(SignalKind::Splade, candidates("splade", per_signal, per_signal / 2));
    results.push(SignalKind::Title, candidates("title", per_signal / 2, per_signal / 2));
    results
}

fn bench_fusion(c: &mut Criterion) {
    let profile = WeightProfile::balanced();
    let results = build_results(200);

    c.bench_function("weighted_fuse_200", |b| {
        b.iter(|| weighted_fuse(black_box(&results), black_box(&profile)))
    });

    c.bench_function("rrf_fuse_200", |b| {
        b.iter(|| rrf_fuse(black_box(&results), black_box(&profile), 60))
    });

    c.bench_function("fuse_and_dedup_200", |b| {
        b.iter(|| {
            let fused = rrf_fuse(black_box(&results), black_box(&profile), 60);
            dedup_by_document(fused, 50)
        })
    });
}

criterion_group!(benches, bench_fusion);
criterion_main!(benches);
