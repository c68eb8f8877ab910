//! `GET /health`, `GET /health/status`

use vortex_core::constants::VERSION;
use vortex_core::models::{HealthReport, SubsystemHealth};

use crate::models::{HealthStatusResponse, LivenessResponse};
use crate::state::AppState;

/// Cheap liveness probe.
pub async fn health() -> LivenessResponse {
    LivenessResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
    }
}

/// Component report: pool occupancy, cache backend, queue depth, store
/// reachability, rolled up worst-first.
pub async fn health_status(state: &AppState) -> HealthStatusResponse {
    let pool = state.pool.status();
    let queue_depth = state.queue.depth();

    let mut subsystems = Vec::new();

    subsystems.push(if pool.available == 0 {
        SubsystemHealth::degraded("resource_pool", "all handles checked out")
    } else {
        SubsystemHealth::healthy("resource_pool")
    });

    subsystems.push(if state.cache.shared_healthy() {
        SubsystemHealth::healthy("cache_backend")
    } else {
        // The cache fails open, so a broken backend degrades rather than
        // breaks the service.
        SubsystemHealth::degraded("cache_backend", "shared tier unreachable")
    });

    subsystems.push(if queue_depth > state.config.queue.depth_warning {
        SubsystemHealth::degraded("job_queue", format!("{queue_depth} jobs waiting"))
    } else {
        SubsystemHealth::healthy("job_queue")
    });

    subsystems.push(if state.store.healthy().await {
        SubsystemHealth::healthy("vector_store")
    } else {
        SubsystemHealth::unhealthy("vector_store", "store unreachable")
    });

    HealthStatusResponse {
        report: HealthReport::from_subsystems(subsystems),
        pool_in_use: pool.in_use,
        pool_size: pool.size,
        queue_depth,
    }
}
