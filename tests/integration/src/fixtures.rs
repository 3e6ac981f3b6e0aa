//! Test fixtures and data builders
//!
//! Seeds the account and photo rows the comment API reads, and mirrors
//! the JSON shapes the API returns.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::Result;
use chrono::{DateTime, Utc};
use gallery_core::Snowflake;
use gallery_db::PgPool;
use serde::{Deserialize, Serialize};

use crate::helpers::TestServer;

/// A fresh id, unique across test processes run a moment apart
pub fn unique_id() -> Snowflake {
    static COUNTER: AtomicI64 = AtomicI64::new(0);
    let base = Utc::now().timestamp_micros() * 1000;
    Snowflake::new(base + COUNTER.fetch_add(1, Ordering::SeqCst))
}

// ============================================================================
// Seeding
// ============================================================================

/// A seeded account with a valid bearer token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Snowflake,
    pub username: String,
    pub name: String,
    pub token: String,
}

impl TestUser {
    pub async fn member(server: &TestServer) -> Result<Self> {
        Self::create(server, "member").await
    }

    pub async fn admin(server: &TestServer) -> Result<Self> {
        Self::create(server, "admin").await
    }

    async fn create(server: &TestServer, role: &str) -> Result<Self> {
        let id = unique_id();
        let username = format!("user_{}", id);
        let name = format!("User {}", id);

        sqlx::query("INSERT INTO users (id, username, name, role) VALUES ($1, $2, $3, $4)")
            .bind(id.into_inner())
            .bind(&username)
            .bind(&name)
            .bind(role)
            .execute(&server.pool)
            .await?;

        let token = server.token_for(id, &username)?;
        Ok(Self {
            id,
            username,
            name,
            token,
        })
    }
}

/// Insert a photo and return its id
pub async fn seed_photo(pool: &PgPool) -> Result<Snowflake> {
    let id = unique_id();
    sqlx::query("INSERT INTO photos (id, title) VALUES ($1, 'integration')")
        .bind(id.into_inner())
        .execute(pool)
        .await?;
    Ok(id)
}

/// Move a comment's creation time into the past
pub async fn age_comment(pool: &PgPool, comment_id: &str, minutes: i64) -> Result<()> {
    let id: i64 = comment_id.parse()?;
    sqlx::query(
        "UPDATE photo_comments SET created_at = created_at - make_interval(mins => $2) WHERE id = $1",
    )
    .bind(id)
    .bind(minutes as i32)
    .execute(pool)
    .await?;
    Ok(())
}

pub fn comments_path(photo_id: Snowflake) -> String {
    format!("/api/photos/{}/comments", photo_id)
}

pub fn comment_path(photo_id: Snowflake, comment_id: &str) -> String {
    format!("/api/photos/{}/comments/{}", photo_id, comment_id)
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub is_anonymous: bool,
}

impl CreateCommentRequest {
    pub fn member(content: &str) -> Self {
        Self {
            content: content.to_string(),
            ..Default::default()
        }
    }

    pub fn guest(name: &str, content: &str) -> Self {
        Self {
            content: content.to_string(),
            guest_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn reply_to(mut self, parent_id: &str) -> Self {
        self.parent_id = Some(parent_id.to_string());
        self
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestTokenBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleReactionRequest {
    pub emoji: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleVoteRequest {
    pub vote_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchVotesRequest {
    pub comment_ids: Vec<String>,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub photo_id: String,
    pub parent_id: Option<String>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub is_anonymous: bool,
    pub is_guest: bool,
    pub is_owner: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub real_author: Option<RealAuthor>,
    pub guest_token: Option<String>,
    pub replies: Option<Vec<CommentView>>,
    pub reactions: HashMap<String, ReactionState>,
    pub votes: VoteSummary,
}

#[derive(Debug, Deserialize)]
pub struct RealAuthor {
    pub id: String,
    pub name: Option<String>,
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionState {
    pub count: i64,
    pub has_reacted: bool,
}

#[derive(Debug, Deserialize)]
pub struct ReactionToggleResponse {
    pub action: String,
    pub reactions: HashMap<String, ReactionState>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reactor {
    pub name: String,
    pub is_guest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSummary {
    pub likes: i64,
    pub dislikes: i64,
    pub user_vote: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VoteToggleResponse {
    pub action: String,
    pub votes: VoteSummary,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
