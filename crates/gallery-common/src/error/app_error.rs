//! Application error types
//!
//! Failures that originate outside the comment rules: bearer tokens,
//! startup configuration, and the database or disk underneath.

use gallery_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// HTTP status; token problems are 401, domain errors keep their class
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidToken | Self::TokenExpired => 401,
            Self::Domain(e) => e.status_code(),
            Self::Config(_) | Self::Database(_) | Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Domain(e) => e.code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Wrap an opaque failure
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}
