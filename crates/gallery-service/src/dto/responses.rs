//! Response DTOs for API endpoints
//!
//! All response DTOs serialize as camelCase JSON; ids go out as strings.

use chrono::{DateTime, Utc};
use gallery_core::{Snowflake, VoteType};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

// ============================================================================
// Comment Responses
// ============================================================================

/// A comment as shown to one particular viewer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Snowflake,
    pub photo_id: Snowflake,
    pub parent_id: Option<Snowflake>,
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub is_anonymous: bool,
    pub is_guest: bool,
    pub is_owner: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Admin-only view of the account behind an anonymous comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_author: Option<RealAuthor>,
    /// Returned once, to the guest who just posted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_token: Option<String>,
    /// Present in the threaded listing only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replies: Option<Vec<CommentResponse>>,
    pub reactions: ReactionSummary,
    pub votes: VoteSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RealAuthor {
    pub id: Snowflake,
    pub name: Option<String>,
    pub username: String,
}

/// Body of a successful delete
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Comment deleted successfully".to_string(),
        }
    }
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// Count for one emoji plus whether the viewer is among the reactors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionState {
    pub count: i64,
    pub has_reacted: bool,
}

/// Emoji → state, serialized as a JSON object in first-reaction order.
/// Emoji nobody reacted with are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionSummary(Vec<(String, ReactionState)>);

impl ReactionSummary {
    pub fn get(&self, emoji: &str) -> Option<&ReactionState> {
        self.0.iter().find(|(e, _)| e == emoji).map(|(_, state)| state)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReactionState)> {
        self.0.iter().map(|(emoji, state)| (emoji.as_str(), state))
    }

    pub(crate) fn push(&mut self, emoji: String, state: ReactionState) {
        self.0.push((emoji, state));
    }
}

impl Serialize for ReactionSummary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (emoji, state) in &self.0 {
            map.serialize_entry(emoji, state)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Added,
    Switched,
    Removed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReactionToggleResponse {
    pub action: ToggleAction,
    pub reactions: ReactionSummary,
}

/// One entry of the reactors list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactorResponse {
    pub name: String,
    pub is_guest: bool,
}

// ============================================================================
// Vote Responses
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSummary {
    pub likes: i64,
    pub dislikes: i64,
    pub user_vote: Option<VoteType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoteToggleResponse {
    pub action: ToggleAction,
    pub votes: VoteSummary,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn ok(service: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
