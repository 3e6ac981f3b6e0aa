//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod reaction;
mod user;
mod vote;

pub use comment::{CommentModel, CommentWithAuthorModel};
pub use reaction::{ActorEmojiModel, ReactionCountModel, ReactionModel, ReactorModel};
pub use user::UserModel;
pub use vote::{ActorVoteModel, VoteCountModel, VoteModel};
