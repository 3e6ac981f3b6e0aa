//! Ports the domain depends on

mod clock;
mod repositories;
mod storage;

pub use clock::{Clock, SystemClock};
pub use repositories::{
    CommentRepository, ReactionRepository, RepoResult, UserRepository, VoteRepository,
};
pub use storage::{ImageKind, ImageStore, ImageUpload};
