//! Deterministic stub encoders. Dense vectors are bag-of-words projections
//! into a small fixed dimension; sparse vectors hash tokens to indices. Text
//! with overlapping vocabulary therefore really does score higher, which is
//! enough to exercise the ranking pipeline end to end.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use vortex_core::errors::{SearchError, VortexResult};
use vortex_core::models::SparseVector;
use vortex_core::traits::{CrossEncoder, Encoder};

pub const STUB_DENSE_DIM: usize = 16;

fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

fn token_bucket(token: &str) -> u32 {
    // FNV-1a keeps the fixture free of hashing deps.
    let mut hash: u32 = 2_166_136_261;
    for b in token.bytes() {
        hash ^= b as u32;
        hash = hash.wrapping_mul(16_777_619);
    }
    hash
}

#[derive(Default)]
pub struct StubEncoder {
    pub fail: AtomicBool,
}

impl StubEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> VortexResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SearchError::EncodingFailed {
                reason: "forced encoder failure".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn sparse(text: &str, scale: f32) -> SparseVector {
        let mut weights: HashMap<u32, f32> = HashMap::new();
        for token in tokens(text) {
            *weights.entry(token_bucket(&token)).or_default() += scale;
        }
        let mut pairs: Vec<(u32, f32)> = weights.into_iter().collect();
        pairs.sort_by_key(|(i, _)| *i);
        SparseVector {
            indices: pairs.iter().map(|(i, _)| *i).collect(),
            values: pairs.iter().map(|(_, v)| *v).collect(),
        }
    }
}

#[async_trait]
impl Encoder for StubEncoder {
    async fn encode_dense(&self, text: &str) -> VortexResult<Vec<f32>> {
        self.check()?;
        let mut vector = vec![0.0f32; STUB_DENSE_DIM];
        for token in tokens(text) {
            vector[(token_bucket(&token) as usize) % STUB_DENSE_DIM] += 1.0;
        }
        Ok(vector)
    }

    async fn encode_sparse(&self, text: &str) -> VortexResult<SparseVector> {
        self.check()?;
        Ok(Self::sparse(text, 1.0))
    }

    async fn encode_splade(&self, text: &str) -> VortexResult<SparseVector> {
        self.check()?;
        // Same hashing with a softer weight, standing in for learned expansion.
        Ok(Self::sparse(text, 0.5))
    }
}

/// Cross-encoder stub scoring by token overlap.
#[derive(Default)]
pub struct StubCrossEncoder {
    pub fail: AtomicBool,
}

impl StubCrossEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CrossEncoder for StubCrossEncoder {
    async fn score(&self, query: &str, passages: &[String]) -> VortexResult<Vec<f64>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SearchError::RerankFailed {
                reason: "forced cross-encoder failure".to_string(),
            }
            .into());
        }
        let query_tokens = tokens(query);
        Ok(passages
            .iter()
            .map(|p| {
                let passage_tokens = tokens(p);
                let overlap = query_tokens
                    .iter()
                    .filter(|t| passage_tokens.contains(t))
                    .count();
                overlap as f64 / (query_tokens.len().max(1) as f64)
            })
            .collect())
    }
}
