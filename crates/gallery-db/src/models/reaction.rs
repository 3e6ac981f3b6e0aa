//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for comment_reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: i64,
    pub comment_id: i64,
    pub user_id: Option<i64>,
    pub guest_token: Option<String>,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregated reaction count (from query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountModel {
    pub comment_id: i64,
    pub emoji: String,
    pub count: i64,
}

/// One emoji an actor placed on a comment
#[derive(Debug, Clone, FromRow)]
pub struct ActorEmojiModel {
    pub comment_id: i64,
    pub emoji: String,
}

/// Reactor row joined with the account, if any
#[derive(Debug, Clone, FromRow)]
pub struct ReactorModel {
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub user_username: Option<String>,
}
