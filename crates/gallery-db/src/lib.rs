//! # gallery-db
//!
//! Database layer implementing the gallery-core repository traits with
//! PostgreSQL via SQLx.
//!
//! - Connection pool management and startup migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity <-> Model mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use gallery_db::{create_pool, PgCommentRepository, PoolConfig};
//!
//! let pool = create_pool(&PoolConfig::new(database_url)).await?;
//! let comments = PgCommentRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, ping, run_migrations, PgPool, PoolConfig, DEFAULT_MIGRATIONS_DIR};
pub use repositories::{
    PgCommentRepository, PgReactionRepository, PgUserRepository, PgVoteRepository,
};
