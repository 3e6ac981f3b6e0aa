//! Comment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for photo_comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub photo_id: i64,
    pub parent_id: Option<i64>,
    pub user_id: Option<i64>,
    pub guest_name: Option<String>,
    pub guest_token: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Comment row left-joined with its member author
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthorModel {
    #[sqlx(flatten)]
    pub comment: CommentModel,
    pub author_username: Option<String>,
    pub author_name: Option<String>,
    pub author_avatar: Option<String>,
    pub author_role: Option<String>,
    pub author_is_active: Option<bool>,
}
