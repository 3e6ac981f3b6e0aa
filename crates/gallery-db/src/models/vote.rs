//! Vote database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for comment_votes table
#[derive(Debug, Clone, FromRow)]
pub struct VoteModel {
    pub id: i64,
    pub comment_id: i64,
    pub user_id: Option<i64>,
    pub guest_token: Option<String>,
    pub vote_type: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregated vote count per type (from query)
#[derive(Debug, Clone, FromRow)]
pub struct VoteCountModel {
    pub comment_id: i64,
    pub vote_type: String,
    pub count: i64,
}

/// An actor's vote type on one comment
#[derive(Debug, Clone, FromRow)]
pub struct ActorVoteModel {
    pub comment_id: i64,
    pub vote_type: String,
}
