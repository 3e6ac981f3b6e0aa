//! Connection pool management

mod postgres;

pub use postgres::{create_pool, ping, run_migrations, PoolConfig, DEFAULT_MIGRATIONS_DIR};
pub use sqlx::PgPool;
