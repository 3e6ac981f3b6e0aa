//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod comments;
pub mod health;
pub mod reactions;
pub mod votes;

use crate::response::ApiError;

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
