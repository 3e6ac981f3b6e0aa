//! # gallery-core
//!
//! Domain layer for photo comments: entities, value objects, repository ports,
//! and domain errors. No database or web framework dependencies.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    normalize_content, normalize_guest_name, Comment, CommentAuthor, CommentWithAuthor, Reaction,
    ReactionCount, Reactor, Role, User, Vote, VoteTally, VoteType, MAX_CONTENT_LEN,
    MAX_GUEST_NAME_LEN,
};
pub use error::DomainError;
pub use traits::{
    Clock, CommentRepository, ImageKind, ImageStore, ImageUpload, ReactionRepository, RepoResult,
    SystemClock, UserRepository, VoteRepository,
};
pub use value_objects::{
    Actor, CommentPolicy, GuestToken, ReactionAllowList, Requester, Snowflake, SnowflakeGenerator,
    SnowflakeParseError, DEFAULT_REACTIONS, MAX_GUEST_TOKEN_LEN,
};
