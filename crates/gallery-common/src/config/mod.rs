//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CommentsConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, ServerConfig, SnowflakeConfig, StorageConfig,
};
