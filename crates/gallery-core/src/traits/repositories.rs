//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Stores carry no business validation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Comment, CommentWithAuthor, Reaction, ReactionCount, Reactor, User, Vote, VoteTally, VoteType,
};
use crate::error::DomainError;
use crate::value_objects::{Actor, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

/// Read-only view of accounts owned by the auth subsystem
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// All comments on a photo, flat, newest first, joined with member profiles
    async fn list_by_photo(&self, photo_id: Snowflake) -> RepoResult<Vec<CommentWithAuthor>>;

    /// Find comment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Insert a new comment. A missing photo surfaces as `PhotoNotFound`.
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Replace the body and stamp `updated_at`
    async fn update_content(
        &self,
        id: Snowflake,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Delete a comment together with its replies, reactions and votes, atomically
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Count reactions by emoji for a comment
    async fn count_by_emoji(&self, comment_id: Snowflake) -> RepoResult<Vec<ReactionCount>>;

    /// Count reactions by emoji for many comments in one round trip.
    /// Comments without reactions are absent from the map.
    async fn count_by_emoji_batch(
        &self,
        comment_ids: &[Snowflake],
    ) -> RepoResult<HashMap<Snowflake, Vec<ReactionCount>>>;

    /// Emoji the actor has placed on a comment
    async fn emojis_by_actor(&self, comment_id: Snowflake, actor: &Actor)
        -> RepoResult<Vec<String>>;

    /// Emoji the actor has placed, for many comments in one round trip
    async fn emojis_by_actor_batch(
        &self,
        comment_ids: &[Snowflake],
        actor: &Actor,
    ) -> RepoResult<HashMap<Snowflake, Vec<String>>>;

    /// Find reaction by comment, actor, and emoji
    async fn find(
        &self,
        comment_id: Snowflake,
        actor: &Actor,
        emoji: &str,
    ) -> RepoResult<Option<Reaction>>;

    /// Add a reaction. A duplicate surfaces as `ReactionAlreadyExists`.
    async fn create(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Remove a reaction by ID. Returns `false` if it was already gone.
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;

    /// Who reacted with an emoji, oldest reaction first
    async fn find_reactors(&self, comment_id: Snowflake, emoji: &str) -> RepoResult<Vec<Reactor>>;
}

// ============================================================================
// Vote Repository
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Like/dislike totals for a comment
    async fn tally(&self, comment_id: Snowflake) -> RepoResult<VoteTally>;

    /// Totals for many comments in one round trip. Comments without votes are absent.
    async fn tally_batch(
        &self,
        comment_ids: &[Snowflake],
    ) -> RepoResult<HashMap<Snowflake, VoteTally>>;

    /// The actor's vote on a comment
    async fn find(&self, comment_id: Snowflake, actor: &Actor) -> RepoResult<Option<Vote>>;

    /// The actor's vote type on a comment, if any
    async fn vote_type_by_actor(
        &self,
        comment_id: Snowflake,
        actor: &Actor,
    ) -> RepoResult<Option<VoteType>> {
        Ok(self.find(comment_id, actor).await?.map(|v| v.vote_type))
    }

    /// The actor's vote types for many comments in one round trip
    async fn vote_types_by_actor_batch(
        &self,
        comment_ids: &[Snowflake],
        actor: &Actor,
    ) -> RepoResult<HashMap<Snowflake, VoteType>>;

    /// Add a vote. A second vote by the same actor surfaces as `VoteAlreadyExists`.
    async fn create(&self, vote: &Vote) -> RepoResult<()>;

    /// Switch a vote's type in a single statement. Returns `false` if it was already gone.
    async fn change_type(&self, id: Snowflake, vote_type: VoteType) -> RepoResult<bool>;

    /// Remove a vote by ID. Returns `false` if it was already gone.
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;
}
