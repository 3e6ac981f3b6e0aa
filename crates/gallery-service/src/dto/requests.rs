//! Request DTOs for API endpoints
//!
//! Bodies deserialize from camelCase JSON and implement `Validate` for the
//! length limits the storage columns impose. Business rules (blank content,
//! guest names, allow-lists) are enforced by the services.

use gallery_core::{ImageUpload, Snowflake};
use serde::{Deserialize, Deserializer};
use validator::Validate;

/// Most comment ids accepted by one batch vote lookup
pub const MAX_BATCH_IDS: usize = 200;

// ============================================================================
// Comment Requests
// ============================================================================

/// New comment or reply
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: Option<String>,

    #[validate(length(max = 100, message = "Guest name must be at most 100 characters"))]
    pub guest_name: Option<String>,

    pub parent_id: Option<Snowflake>,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_anonymous: bool,

    /// Attached image, filled in from a multipart upload
    #[serde(skip)]
    pub image: Option<ImageUpload>,
}

/// Edit a comment's body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    pub content: Option<String>,

    #[validate(length(max = 64, message = "Invalid guest token"))]
    pub guest_token: Option<String>,
}

/// Optional body of a delete request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentRequest {
    #[validate(length(max = 64, message = "Invalid guest token"))]
    pub guest_token: Option<String>,
}

// ============================================================================
// Reaction / Vote Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ToggleReactionRequest {
    #[validate(length(max = 32, message = "Invalid reaction"))]
    pub emoji: Option<String>,

    pub guest_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ToggleVoteRequest {
    pub vote_type: Option<String>,

    pub guest_token: Option<String>,
}

/// Vote aggregates for many comments at once
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BatchVotesRequest {
    #[validate(length(max = 200, message = "At most 200 comment ids may be requested at once"))]
    pub comment_ids: Option<Vec<Snowflake>>,

    #[validate(length(max = 64, message = "Invalid guest token"))]
    pub guest_token: Option<String>,
}

// ============================================================================
// Query Parameters
// ============================================================================

/// `?guestToken=` on read endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestTokenQuery {
    pub guest_token: Option<String>,
}

/// `?emoji=` on the reactors endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReactorsQuery {
    pub emoji: Option<String>,
}

/// Form fields send booleans as strings; only a literal `"true"` counts
pub fn parse_flag(raw: &str) -> bool {
    raw.trim() == "true"
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Text(text)) => parse_flag(&text),
        None => false,
    })
}
