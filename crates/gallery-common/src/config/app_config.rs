//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::env;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use gallery_core::{CommentPolicy, ReactionAllowList};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub snowflake: SnowflakeConfig,
    pub comments: CommentsConfig,
    /// Apply pending migrations at startup
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Comment image storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u32,
}

impl StorageConfig {
    #[must_use]
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_size_mb as usize * 1024 * 1024
    }
}

/// Worker ids are 10 bits wide
pub const MAX_WORKER_ID: u16 = 1023;

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

/// Comment lifecycle and reaction settings
#[derive(Debug, Clone, Deserialize)]
pub struct CommentsConfig {
    #[serde(default = "default_edit_window")]
    pub edit_window_secs: i64,
    #[serde(default = "default_delete_window")]
    pub delete_window_secs: i64,
    /// Empty means the built-in reaction set
    #[serde(default)]
    pub reaction_allowlist: Vec<String>,
}

impl CommentsConfig {
    /// Build the engine policy from these settings
    #[must_use]
    pub fn policy(&self) -> CommentPolicy {
        CommentPolicy {
            edit_window: window(self.edit_window_secs),
            delete_window: window(self.delete_window_secs),
            reactions: ReactionAllowList::new(&self.reaction_allowlist),
        }
    }
}

/// Largest window `chrono::Duration` can hold
pub const MAX_WINDOW_SECS: i64 = i64::MAX / 1000;

/// Values from `from_lookup` are already in range; deserialized ones are clamped
fn window(secs: i64) -> chrono::Duration {
    chrono::Duration::try_seconds(secs.clamp(0, MAX_WINDOW_SECS)).unwrap_or(chrono::Duration::MAX)
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            edit_window_secs: default_edit_window(),
            delete_window_secs: default_delete_window(),
            reaction_allowlist: Vec::new(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "gallery-api".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_access_token_expiry() -> i64 {
    86400 // 1 day
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_max_upload_size() -> u32 {
    15
}

fn default_edit_window() -> i64 {
    CommentPolicy::DEFAULT_EDIT_WINDOW_SECS
}

fn default_delete_window() -> i64 {
    CommentPolicy::DEFAULT_DELETE_WINDOW_SECS
}

fn default_run_migrations() -> bool {
    true
}

/// Typed reads over a variable lookup. Blank values count as unset.
struct Vars<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.trim().is_empty())
    }

    fn string_or(&self, name: &str, default: fn() -> String) -> String {
        self.get(name).unwrap_or_else(default)
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.get(name).ok_or(ConfigError::MissingVar(name))
    }

    /// Present but malformed is an error, not a fallback
    fn parsed<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, ConfigError> {
        self.get(name)
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(name, raw.clone()))
            })
            .transpose()
    }

    fn parsed_or<T: FromStr>(&self, name: &'static str, default: fn() -> T) -> Result<T, ConfigError> {
        Ok(self.parsed(name)?.unwrap_or_else(default))
    }

    fn ranged<T>(
        &self,
        name: &'static str,
        default: fn() -> T,
        range: RangeInclusive<T>,
    ) -> Result<T, ConfigError>
    where
        T: FromStr + PartialOrd + fmt::Display,
    {
        let value = self.parsed_or(name, default)?;
        if range.contains(&value) {
            Ok(value)
        } else {
            Err(ConfigError::InvalidValue(name, value.to_string()))
        }
    }

    fn flag(&self, name: &'static str, default: bool) -> Result<bool, ConfigError> {
        self.get(name).map_or(Ok(default), |raw| parse_bool(name, &raw))
    }

    /// Comma separated, empty items dropped
    fn list(&self, name: &str) -> Vec<String> {
        self.get(name)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(name, raw.to_string())),
    }
}

impl AppConfig {
    /// Load from the process environment after applying `.env`, if any
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or any value is malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or any value is malformed
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars { lookup };

        let env = match vars.get("APP_ENV") {
            Some(name) => Environment::from_name(&name)
                .ok_or(ConfigError::InvalidValue("APP_ENV", name))?,
            None => Environment::default(),
        };

        Ok(Self {
            app: AppSettings {
                name: vars.string_or("APP_NAME", default_app_name),
                env,
            },
            api: ServerConfig {
                host: vars.string_or("API_HOST", default_host),
                port: vars.parsed("API_PORT")?.ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_connections: vars.parsed_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: vars.parsed_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            },
            jwt: JwtConfig {
                secret: vars.required("JWT_SECRET")?,
                access_token_expiry: vars
                    .parsed_or("JWT_ACCESS_TOKEN_EXPIRY", default_access_token_expiry)?,
            },
            cors: CorsConfig {
                allowed_origins: vars.list("CORS_ALLOWED_ORIGINS"),
            },
            storage: StorageConfig {
                upload_dir: vars.string_or("UPLOAD_DIR", default_upload_dir),
                max_upload_size_mb: vars.parsed_or("MAX_UPLOAD_SIZE_MB", default_max_upload_size)?,
            },
            snowflake: SnowflakeConfig {
                worker_id: vars.ranged("WORKER_ID", u16::default, 0..=MAX_WORKER_ID)?,
            },
            comments: CommentsConfig {
                edit_window_secs: vars.ranged(
                    "COMMENT_EDIT_WINDOW_SECS",
                    default_edit_window,
                    1..=MAX_WINDOW_SECS,
                )?,
                delete_window_secs: vars.ranged(
                    "COMMENT_DELETE_WINDOW_SECS",
                    default_delete_window,
                    1..=MAX_WINDOW_SECS,
                )?,
                reaction_allowlist: vars.list("REACTION_ALLOWLIST"),
            },
            run_migrations: vars.flag("RUN_MIGRATIONS", default_run_migrations())?,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
