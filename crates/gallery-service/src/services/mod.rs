//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of
//! one request and orchestrates the repository ports.

mod aggregates;
pub mod comment;
pub mod context;
pub mod error;
pub mod identity;
pub mod reaction;
pub mod vote;

pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use identity::IdentityService;
pub use reaction::ReactionService;
pub use vote::VoteService;
