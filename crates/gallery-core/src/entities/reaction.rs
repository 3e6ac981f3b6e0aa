//! Reaction entity - an emoji placed on a comment by one actor

use chrono::{DateTime, Utc};

use crate::value_objects::{Actor, Snowflake};

/// Reaction entity, unique per `(comment_id, actor, emoji)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: Snowflake,
    pub comment_id: Snowflake,
    pub actor: Actor,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(
        id: Snowflake,
        comment_id: Snowflake,
        actor: Actor,
        emoji: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            comment_id,
            actor,
            emoji: emoji.into(),
            created_at,
        }
    }

    #[inline]
    pub fn is_emoji(&self, emoji: &str) -> bool {
        self.emoji == emoji
    }
}

/// Per-emoji count for one comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionCount {
    pub emoji: String,
    pub count: i64,
}

impl ReactionCount {
    pub fn new(emoji: impl Into<String>, count: i64) -> Self {
        Self {
            emoji: emoji.into(),
            count,
        }
    }
}

/// Someone who reacted with a given emoji
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reactor {
    pub display_name: String,
    pub is_guest: bool,
}

impl Reactor {
    /// Guests all render as "Guest"; members by name, then username
    pub fn new(name: Option<String>, username: Option<String>, is_guest: bool) -> Self {
        let display_name = if is_guest {
            None
        } else {
            name.filter(|n| !n.trim().is_empty())
                .or(username.filter(|u| !u.trim().is_empty()))
        };

        Self {
            display_name: display_name.unwrap_or_else(|| "Guest".to_string()),
            is_guest,
        }
    }
}
