//! Application state shared across HTTP handlers

use crate::acl::{AclResolver, Clock, SystemClock};
use crate::config::Config;
use crate::directory::Directory;
use crate::services::{AclService, PipelineService};
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Every field is behind an `Arc`, so cloning per worker is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Store collaborators
    pub storage: StorageLayer,
    /// Principal resolution
    pub directory: Arc<dyn Directory>,
    pub acl_service: Arc<AclService>,
    pub pipeline_service: Arc<PipelineService>,
}

impl AppState {
    pub fn new(config: Config, storage: StorageLayer, directory: Arc<dyn Directory>) -> Self {
        Self::with_clock(config, storage, directory, Arc::new(SystemClock))
    }

    /// State whose resolver reads time from `clock`
    pub fn with_clock(
        config: Config,
        storage: StorageLayer,
        directory: Arc<dyn Directory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let resolver = AclResolver::with_clock(storage.acls.clone(), clock);
        let acl_service = AclService::new(
            resolver.clone(),
            storage.pipelines.clone(),
            config.auth().optimistic_concurrency,
        );
        let pipeline_service =
            PipelineService::new(storage.pipelines.clone(), storage.acls.clone(), resolver);

        Self {
            config: Arc::new(config),
            storage,
            directory,
            acl_service: Arc::new(acl_service),
            pipeline_service: Arc::new(pipeline_service),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
