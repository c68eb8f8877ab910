/// Vortex system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound on `top_k` accepted at the API boundary.
pub const MAX_TOP_K: usize = 100;

/// Maximum number of candidates handed to the cross-encoder pass.
pub const MAX_RERANK_CANDIDATES: usize = 50;

/// Neutral recency score for documents without a parseable date.
pub const NEUTRAL_RECENCY_SCORE: f64 = 0.3;

/// Lowest and highest document access levels.
pub const MIN_ACCESS_LEVEL: u8 = 1;
pub const MAX_ACCESS_LEVEL: u8 = 4;

/// Maximum batch size for bulk ingestion.
pub const MAX_BULK_BATCH_SIZE: usize = 1000;
