//! Domain entities - core business objects

mod comment;
mod reaction;
mod user;
mod vote;

pub use comment::{
    normalize_content, normalize_guest_name, Comment, CommentAuthor, CommentWithAuthor,
    MAX_CONTENT_LEN, MAX_GUEST_NAME_LEN,
};
pub use reaction::{Reaction, ReactionCount, Reactor};
pub use user::{Role, User};
pub use vote::{Vote, VoteTally, VoteType};
