//! Error handling utilities for repositories

use gallery_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for a foreign key violation. The callback receives the violated
/// constraint name so callers can tell which parent row was missing.
pub fn map_foreign_key_violation<F>(e: SqlxError, on_foreign_key: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_foreign_key(db_err.constraint());
        }
    }
    map_db_error(e)
}

/// Unique violations map to `on_unique`, foreign key violations to `on_foreign_key`
pub fn map_insert_error<U, F>(e: SqlxError, on_unique: U, on_foreign_key: F) -> DomainError
where
    U: FnOnce() -> DomainError,
    F: FnOnce(Option<&str>) -> DomainError,
{
    let is_unique = e
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());
    if is_unique {
        on_unique()
    } else {
        map_foreign_key_violation(e, on_foreign_key)
    }
}
