//! Service layer error types

use gallery_common::AppError;
use gallery_core::DomainError;
use thiserror::Error;

/// Everything a comment, reaction, vote or identity operation can fail with
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A comment rule was violated or a store failed
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Token or infrastructure failure
    #[error(transparent)]
    App(#[from] AppError),

    /// The bearer token named no usable account
    #[error("{0}")]
    Unauthorized(String),

    /// Malformed input the domain has no variant for
    #[error("{0}")]
    Validation(String),

    /// `ServiceContext` was built without a required port
    #[error("{0} is required")]
    MissingDependency(&'static str),
}

impl ServiceError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => e.status_code(),
            Self::App(e) => e.status_code(),
            Self::Unauthorized(_) => 401,
            Self::Validation(_) => 400,
            Self::MissingDependency(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MissingDependency(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
