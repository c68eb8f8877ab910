use async_trait::async_trait;

use crate::errors::VortexResult;
use crate::models::SparseVector;

/// The external embedding service: text in, vectors out. Model execution is
/// entirely behind this contract.
#[async_trait]
pub trait Encoder: Send + Sync {
    async fn encode_dense(&self, text: &str) -> VortexResult<Vec<f32>>;

    /// Lexical (BM25-style) term weighting.
    async fn encode_sparse(&self, text: &str) -> VortexResult<SparseVector>;

    /// Learned sparse (SPLADE-style) token weighting.
    async fn encode_splade(&self, text: &str) -> VortexResult<SparseVector>;
}

/// The external cross-encoder reranking service.
#[async_trait]
pub trait CrossEncoder: Send + Sync {
    /// Score each passage against the query. Returns one raw relevance score
    /// per passage, in input order.
    async fn score(&self, query: &str, passages: &[String]) -> VortexResult<Vec<f64>>;
}
