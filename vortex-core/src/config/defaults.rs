//! Default values shared by the config structs.

pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_EPSILON: f64 = 0.1;
pub const DEFAULT_SIGNAL_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_RERANK_TOP_N: usize = 50;
pub const DEFAULT_TRIAGE_THRESHOLD: f64 = 0.98;

/// Recency-intent temporal parameters.
pub const RECENT_ALPHA: f64 = 0.5;
pub const RECENT_HALF_LIFE_DAYS: f64 = 365.0;
/// Neutral temporal parameters.
pub const NEUTRAL_ALPHA: f64 = 0.8;
pub const NEUTRAL_HALF_LIFE_DAYS: f64 = 730.0;

pub const DEFAULT_L1_CAPACITY: u64 = 2_000;
pub const DEFAULT_L1_TTL_SECS: u64 = 600;
pub const DEFAULT_L2_TTL_SECS: u64 = 3_600;

pub const DEFAULT_POOL_SIZE: usize = 3;
pub const DEFAULT_ACQUIRE_TIMEOUT_MS: u64 = 10_000;

pub const DEFAULT_QUEUE_WORKERS: usize = 2;
