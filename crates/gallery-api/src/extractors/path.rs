//! Path parameter extractors
//!
//! Ids arrive as strings and must parse as positive snowflakes.

use gallery_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.trim()
        .parse::<Snowflake>()
        .ok()
        .filter(|id| id.into_inner() > 0)
        .ok_or_else(|| ApiError::invalid_path(format!("Invalid {name}")))
}

/// `/photos/:photo_id/...`
#[derive(Debug, Deserialize)]
pub struct PhotoPath {
    pub photo_id: String,
}

impl PhotoPath {
    pub fn photo_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.photo_id, "photoId")
    }
}

/// `/photos/:photo_id/comments/:comment_id`
#[derive(Debug, Deserialize)]
pub struct PhotoCommentPath {
    pub photo_id: String,
    pub comment_id: String,
}

impl PhotoCommentPath {
    pub fn photo_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.photo_id, "photoId")
    }

    pub fn comment_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.comment_id, "commentId")
    }
}

/// `/comments/:comment_id/...`
#[derive(Debug, Deserialize)]
pub struct CommentPath {
    pub comment_id: String,
}

impl CommentPath {
    pub fn comment_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.comment_id, "commentId")
    }
}
