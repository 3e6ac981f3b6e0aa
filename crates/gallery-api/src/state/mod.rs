//! Shared handler state

use std::sync::Arc;

use gallery_common::AppConfig;
use gallery_db::PgPool;
use gallery_service::ServiceContext;

/// Cheap to clone; every handler gets the same services, pool and config
#[derive(Clone)]
pub struct AppState(Arc<Shared>);

struct Shared {
    services: ServiceContext,
    // kept beside the services for the readiness probe
    pool: PgPool,
    config: AppConfig,
}

impl AppState {
    pub fn new(services: ServiceContext, pool: PgPool, config: AppConfig) -> Self {
        Self(Arc::new(Shared {
            services,
            pool,
            config,
        }))
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.0.services
    }

    pub fn pool(&self) -> &PgPool {
        &self.0.pool
    }

    pub fn config(&self) -> &AppConfig {
        &self.0.config
    }

    /// Image attachment limit in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.0.config.storage.max_upload_bytes()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("services", &self.0.services)
            .field("env", &self.0.config.app.env)
            .finish_non_exhaustive()
    }
}
