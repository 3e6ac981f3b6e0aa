//! Entity <-> Model mappers
//!
//! Conversions between database rows and domain entities. Rows that break a
//! domain invariant map to `DomainError::DatabaseError` rather than panicking.

mod actor;
mod comment;
mod reaction;
mod user;
mod vote;

pub use actor::actor_from_columns;
pub use comment::CommentInsert;
pub use vote::vote_type_from_db;
