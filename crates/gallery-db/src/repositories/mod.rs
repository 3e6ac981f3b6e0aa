//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in gallery-core.

mod actor;
mod comment;
mod error;
mod reaction;
mod user;
mod vote;

pub use comment::PgCommentRepository;
pub use reaction::PgReactionRepository;
pub use user::PgUserRepository;
pub use vote::PgVoteRepository;
