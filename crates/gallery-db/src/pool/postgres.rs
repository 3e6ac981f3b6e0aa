//! PostgreSQL pool, readiness probe and startup migrations

use std::path::Path;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, instrument, warn};

/// `migrations/` at the workspace root
pub const DEFAULT_MIGRATIONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../migrations");

/// Pool sizing and connection lifetimes
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl PoolConfig {
    /// Ten connections at most, one kept warm
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(5 * 60),
            max_lifetime: Duration::from_secs(30 * 60),
        }
    }

    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections.min(self.max_connections))
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(Some(self.idle_timeout))
            .max_lifetime(Some(self.max_lifetime))
    }

    /// Open the pool, failing if the first connection cannot be made
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        self.options().connect(&self.url).await
    }
}

impl From<&gallery_common::DatabaseConfig> for PoolConfig {
    fn from(config: &gallery_common::DatabaseConfig) -> Self {
        Self {
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            ..Self::new(config.url.as_str())
        }
    }
}

/// Shorthand for `config.connect()`
pub async fn create_pool(config: &PoolConfig) -> Result<PgPool, sqlx::Error> {
    config.connect().await
}

/// Round-trip `SELECT 1` for readiness checks
#[instrument(skip(pool))]
pub async fn ping(pool: &PgPool) -> bool {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "Database ping failed");
            false
        }
    }
}

/// Apply the migrations found in `dir` that the database has not seen
pub async fn run_migrations(pool: &PgPool, dir: impl AsRef<Path>) -> Result<(), MigrateError> {
    let dir = dir.as_ref();
    let migrator = Migrator::new(dir).await?;
    migrator.run(pool).await?;
    info!(dir = %dir.display(), known = migrator.iter().count(), "Migrations up to date");
    Ok(())
}
