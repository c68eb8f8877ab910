//! Application state: explicitly constructed at process start and passed by
//! reference to handlers — no module-level singletons.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use vortex_cache::CacheManager;
use vortex_core::config::VortexConfig;
use vortex_core::errors::{VortexError, VortexResult};
use vortex_core::traits::{CrossEncoder, Encoder, JobHandler, SharedCache, VectorStore};
use vortex_ingest::IngestManager;
use vortex_pool::ResourcePool;
use vortex_queue::QueueManager;
use vortex_retrieval::{RewardTracker, SearchOrchestrator, WeightSelector};
use vortex_security::{
    AccessControlManager, SecurityLevelManager, SecurityOverride, SecurityProfile,
};

/// One heavyweight manager handle: the store client plus model handles.
/// The pool is the sole owner of these.
#[derive(Clone)]
pub struct SearchResources {
    pub store: Arc<dyn VectorStore>,
    pub encoder: Arc<dyn Encoder>,
    pub cross_encoder: Option<Arc<dyn CrossEncoder>>,
    pub dense_dim: usize,
}

/// Everything handlers need, wired once at startup.
pub struct AppState {
    pub config: VortexConfig,
    pub profile: SecurityProfile,
    pub pool: ResourcePool<SearchResources>,
    pub cache: Arc<CacheManager>,
    pub queue: QueueManager,
    pub tracker: Arc<RewardTracker>,
    pub access: AccessControlManager,
    /// Store reference used for health probes and administrative updates,
    /// outside the pooled search path.
    pub store: Arc<dyn VectorStore>,
}

impl AppState {
    /// Wire the full service. `resources` fixes the pool size; the job
    /// queue gets a batch-ingest handler bound to the same pool. Blocking
    /// security-profile findings fail startup here, not at request time.
    pub fn new(
        config: VortexConfig,
        resources: Vec<SearchResources>,
        shared_cache: Arc<dyn SharedCache>,
    ) -> VortexResult<Self> {
        Self::with_overrides(config, resources, shared_cache, &std::collections::HashMap::new())
    }

    /// Like [`AppState::new`], with security-profile overrides from the
    /// administrative configuration document.
    pub fn with_overrides(
        config: VortexConfig,
        resources: Vec<SearchResources>,
        shared_cache: Arc<dyn SharedCache>,
        overrides: &std::collections::HashMap<String, SecurityOverride>,
    ) -> VortexResult<Self> {
        let profile =
            vortex_security::activate(&config.security.profile, overrides, chrono::Utc::now())?;

        let first = resources.first().ok_or_else(|| {
            VortexError::Validation("resource pool requires at least one handle".to_string())
        })?;
        let store = first.store.clone();

        let pool = ResourcePool::new(resources);
        let cache = Arc::new(CacheManager::new(&config.cache, shared_cache));
        let tracker = Arc::new(RewardTracker::new());

        let ingest_handler: Arc<dyn JobHandler> = Arc::new(BatchIngestHandler {
            pool: pool.clone(),
        });
        let queue = QueueManager::start(&config.queue, vec![ingest_handler])?;

        info!(
            pool = pool.status().size,
            profile = %profile.name,
            "application state initialized"
        );
        Ok(Self {
            config,
            profile,
            pool,
            cache,
            queue,
            tracker,
            access: AccessControlManager::new(),
            store,
        })
    }

    /// Build the per-request orchestrator over one pooled handle.
    pub fn orchestrator(&self, resources: &SearchResources) -> SearchOrchestrator {
        let selector = WeightSelector::new(
            self.config.search.use_bandit,
            self.config.search.epsilon,
            self.tracker.clone(),
        );
        SearchOrchestrator::new(
            resources.store.clone(),
            resources.encoder.clone(),
            resources.cross_encoder.clone(),
            self.cache.clone(),
            selector,
            self.config.search.clone(),
        )
    }

    pub fn security_level_manager(&self) -> SecurityLevelManager {
        SecurityLevelManager::new(self.store.clone(), self.access)
    }
}

/// Executes queued `batch_ingest` jobs on pooled resources, away from the
/// request path.
struct BatchIngestHandler {
    pool: ResourcePool<SearchResources>,
}

#[async_trait::async_trait]
impl JobHandler for BatchIngestHandler {
    fn job_type(&self) -> &str {
        "batch_ingest"
    }

    async fn run(&self, payload: &Value) -> VortexResult<()> {
        let collection = payload
            .get("collection")
            .and_then(Value::as_str)
            .ok_or_else(|| VortexError::Validation("missing collection".to_string()))?;
        let documents = payload
            .get("documents")
            .and_then(Value::as_array)
            .ok_or_else(|| VortexError::Validation("missing documents".to_string()))?;

        let resources = self
            .pool
            .acquire()
            .await
            .map_err(|e| VortexError::Internal(e.to_string()))?;
        let ingest = IngestManager::new(
            resources.store.clone(),
            resources.encoder.clone(),
            resources.dense_dim,
        );
        ingest.upsert_documents(collection, documents).await?;
        Ok(())
    }
}
