//! Service-level tests: the handlers wired over in-memory fakes, exercising
//! the same flows the HTTP layer would.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use test_fixtures::{MemoryVectorStore, StubCrossEncoder, StubEncoder, STUB_DENSE_DIM};
use vortex_api::handlers;
use vortex_api::models::{
    BatchIngestRequest, FeedbackRequest, QueryRequest, SecurityLevelRequest,
};
use vortex_api::{AppState, BearerClaims, Credentials, ErrorCode, SearchResources};
use vortex_cache::InMemoryShared;
use vortex_core::config::VortexConfig;
use vortex_core::models::{HealthStatus, JobStatus};

fn service_key() -> &'static str {
    "test-service-key"
}

fn build_state(store: Arc<MemoryVectorStore>) -> AppState {
    let mut config = VortexConfig::default();
    config.security.api_key = Some(service_key().to_string());
    config.search.use_bandit = false;

    let resources: Vec<SearchResources> = (0..config.pool.size)
        .map(|_| SearchResources {
            store: store.clone(),
            encoder: Arc::new(StubEncoder::new()),
            cross_encoder: Some(Arc::new(StubCrossEncoder::new())),
            dense_dim: STUB_DENSE_DIM,
        })
        .collect();

    AppState::new(config, resources, Arc::new(InMemoryShared::new())).unwrap()
}

fn service() -> Credentials {
    Credentials::api_key(service_key())
}

fn viewer(user_id: &str) -> Credentials {
    Credentials::bearer(BearerClaims {
        user_id: user_id.to_string(),
        role: "viewer".to_string(),
        team: None,
        exp: None,
    })
}

async fn ingest_and_wait(state: &AppState, collection: &str, documents: Vec<serde_json::Value>) {
    let response = handlers::batch_ingest(
        state,
        &service(),
        BatchIngestRequest {
            collection: collection.to_string(),
            documents,
        },
    )
    .await
    .unwrap();
    assert_eq!(response.status, "queued");

    for _ in 0..200 {
        let status = handlers::job_status(state, &response.job_id).await.unwrap();
        if status.job.status.is_terminal() {
            assert_eq!(status.job.status, JobStatus::Done, "{:?}", status.job.message);
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("ingest job never finished");
}

#[tokio::test]
async fn unknown_security_profile_fails_startup() {
    let mut config = VortexConfig::default();
    config.security.profile = "fortress".to_string();
    let resources = vec![SearchResources {
        store: Arc::new(MemoryVectorStore::new()),
        encoder: Arc::new(StubEncoder::new()),
        cross_encoder: None,
        dense_dim: STUB_DENSE_DIM,
    }];
    assert!(AppState::new(config, resources, Arc::new(InMemoryShared::new())).is_err());
}

#[tokio::test]
async fn ingest_then_query_roundtrip() {
    let store = Arc::new(MemoryVectorStore::new());
    let state = build_state(store);

    ingest_and_wait(
        &state,
        "docs",
        vec![
            json!({"title": "graduation guide", "content": "graduation requirements and credits"}),
            json!({"title": "lab intro", "content": "robotics research laboratory overview"}),
        ],
    )
    .await;

    let response = handlers::query_hybrid(
        &state,
        &viewer("alice"),
        QueryRequest {
            query_text: "graduation requirements".to_string(),
            top_k: 5,
            collections: vec!["docs".to_string()],
            filters: None,
            bypass_cache: false,
        },
    )
    .await
    .unwrap();

    assert_eq!(response.status, "ok");
    assert!(!response.results.is_empty());
    assert!(response.results[0].title.contains("graduation"));
}

#[tokio::test]
async fn hostile_and_oversized_requests_are_rejected() {
    let state = build_state(Arc::new(MemoryVectorStore::new()));

    let injection = handlers::query_hybrid(
        &state,
        &viewer("alice"),
        QueryRequest {
            query_text: "x union select password from users".to_string(),
            top_k: 5,
            collections: vec!["docs".to_string()],
            filters: None,
            bypass_cache: false,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(injection.code, ErrorCode::InjectionDetected);

    let quota = handlers::query_hybrid(
        &state,
        &viewer("alice"),
        QueryRequest {
            query_text: "normal query".to_string(),
            top_k: 90,
            collections: vec!["docs".to_string()],
            filters: None,
            bypass_cache: false,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(quota.code, ErrorCode::QuotaExceeded);

    let missing = handlers::query_hybrid(
        &state,
        &viewer("alice"),
        QueryRequest {
            query_text: "q".to_string(),
            top_k: 5,
            collections: vec![],
            filters: None,
            bypass_cache: false,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(missing.code, ErrorCode::MissingField);
}

#[tokio::test]
async fn guests_cannot_ingest() {
    let state = build_state(Arc::new(MemoryVectorStore::new()));
    let err = handlers::batch_ingest(
        &state,
        &Credentials::anonymous(),
        BatchIngestRequest {
            collection: "docs".to_string(),
            documents: vec![json!({"content": "x"})],
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::Forbidden);
}

#[tokio::test]
async fn feedback_quality_gate_and_reward_accounting() {
    let state = build_state(Arc::new(MemoryVectorStore::new()));

    let accepted = handlers::submit_feedback(
        &state,
        &viewer("alice"),
        FeedbackRequest {
            query: "graduation".to_string(),
            action_type: "like".to_string(),
            target_id: Some("doc-1".to_string()),
            strategy: Some("admin_lookup".to_string()),
            dwell_time_secs: 45.0,
            metadata: None,
        },
    )
    .await
    .unwrap();
    assert!(accepted.recorded);
    assert_eq!(state.tracker.count("admin_lookup"), 1);
    assert_eq!(state.tracker.average("admin_lookup"), 1.0);

    // Bot-like, instant feedback is rejected and leaves no trace.
    let rejected = handlers::submit_feedback(
        &state,
        &viewer("bot"),
        FeedbackRequest {
            query: "graduation".to_string(),
            action_type: "click".to_string(),
            target_id: None,
            strategy: Some("admin_lookup".to_string()),
            dwell_time_secs: 0.2,
            metadata: Some(json!({"bot_like": true})),
        },
    )
    .await
    .unwrap();
    assert!(!rejected.recorded);
    assert_eq!(state.tracker.count("admin_lookup"), 1);
}

#[tokio::test]
async fn health_status_reflects_store_outage() {
    let store = Arc::new(MemoryVectorStore::new());
    let state = build_state(store.clone());

    let healthy = handlers::health_status(&state).await;
    assert_eq!(healthy.report.overall, HealthStatus::Healthy);
    assert_eq!(healthy.pool_in_use, 0);

    store.set_reachable(false);
    let unhealthy = handlers::health_status(&state).await;
    assert_eq!(unhealthy.report.overall, HealthStatus::Unhealthy);
}

#[tokio::test]
async fn admin_epoch_bump_is_gated_and_counted() {
    let state = build_state(Arc::new(MemoryVectorStore::new()));

    let err = handlers::bump_epoch(&state, &viewer("alice"), "docs")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Forbidden);

    let bumped = handlers::bump_epoch(&state, &service(), "docs").await.unwrap();
    assert_eq!(bumped.epoch, 1);
}

#[tokio::test]
async fn security_level_update_flows_through_all_chunks() {
    let store = Arc::new(MemoryVectorStore::new());
    let state = build_state(store.clone());

    let doc = json!({
        "title": "restricted",
        "content": "internal procedures manual with many sections",
    });
    ingest_and_wait(&state, "docs", vec![doc.clone()]).await;
    let db_id = vortex_core::ids::doc_hash_id(&doc);

    let response = handlers::update_security_level(
        &state,
        &service(),
        SecurityLevelRequest {
            collection: "docs".to_string(),
            doc_id: db_id.clone(),
            new_level: 3,
        },
    )
    .await
    .unwrap();
    assert!(response.chunks_updated >= 1);
    assert!(store.levels_for("docs", &db_id).iter().all(|&l| l == 3));

    let forbidden = handlers::update_security_level(
        &state,
        &viewer("mallory"),
        SecurityLevelRequest {
            collection: "docs".to_string(),
            doc_id: db_id,
            new_level: 1,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(forbidden.code, ErrorCode::Forbidden);
}
