//! # gallery-common
//!
//! Shared utilities: configuration, error handling, token validation, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, JwtService};
pub use config::{
    AppConfig, AppSettings, CommentsConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, ServerConfig, SnowflakeConfig, StorageConfig,
};
pub use error::AppError;
pub use telemetry::{init_logging, init_logging_with, LogFormat, LogSettings, TracingError};
