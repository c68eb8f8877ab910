//! Request/response bodies for the API surface.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vortex_core::models::{
    ChunkPayload, Filter, HealthReport, Job, ScoreBreakdown, ScoredResult, SearchOutcome,
};

fn default_top_k() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query_text: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    pub collections: Vec<String>,
    #[serde(default)]
    pub filters: Option<Filter>,
    #[serde(default)]
    pub bypass_cache: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResultItem {
    pub id: String,
    pub score: f64,
    pub title: String,
    pub snippet: String,
    pub breakdown: ScoreBreakdown,
    pub payload: ChunkPayload,
}

impl From<ScoredResult> for QueryResultItem {
    fn from(r: ScoredResult) -> Self {
        Self {
            id: r.doc_id,
            score: r.score,
            title: r.title,
            snippet: r.snippet,
            breakdown: r.breakdown,
            payload: r.payload,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub status: String,
    pub degraded: bool,
    /// Weight strategy that produced this ranking; echo it back in feedback.
    pub strategy: String,
    pub results: Vec<QueryResultItem>,
}

impl From<SearchOutcome> for QueryResponse {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            status: if outcome.degraded {
                "degraded".to_string()
            } else {
                "ok".to_string()
            },
            degraded: outcome.degraded,
            strategy: outcome.strategy,
            results: outcome.results.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchIngestRequest {
    pub collection: String,
    pub documents: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchIngestResponse {
    pub status: String,
    pub job_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobStatusResponse {
    pub job: Job,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobListResponse {
    pub queued: usize,
    pub running: usize,
    pub done: usize,
    pub failed: usize,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    pub query: String,
    /// One of `click`, `like`, `bookmark`, `dislike`.
    pub action_type: String,
    #[serde(default)]
    pub target_id: Option<String>,
    /// Strategy name echoed from the query response.
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub dwell_time_secs: f64,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub recorded: bool,
    pub confidence: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LivenessResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatusResponse {
    pub report: HealthReport,
    pub pool_in_use: usize,
    pub pool_size: usize,
    pub queue_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityLevelRequest {
    pub collection: String,
    pub doc_id: String,
    pub new_level: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityLevelResponse {
    pub doc_id: String,
    pub new_level: i64,
    pub chunks_updated: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EpochBumpResponse {
    pub collection: String,
    pub epoch: i64,
}
