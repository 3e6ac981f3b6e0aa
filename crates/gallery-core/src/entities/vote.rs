//! Vote entity - a single like/dislike slot per actor per comment

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{Actor, Snowflake};

/// Kind of vote. Mutually exclusive within one actor's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Like,
    Dislike,
}

impl VoteType {
    pub const ALL: [VoteType; 2] = [VoteType::Like, VoteType::Dislike];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            _ => Err(DomainError::InvalidVoteType),
        }
    }
}

/// Vote entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id: Snowflake,
    pub comment_id: Snowflake,
    pub actor: Actor,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(
        id: Snowflake,
        comment_id: Snowflake,
        actor: Actor,
        vote_type: VoteType,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            comment_id,
            actor,
            vote_type,
            created_at,
        }
    }
}

/// Like/dislike totals for one comment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    pub likes: i64,
    pub dislikes: i64,
}

impl VoteTally {
    pub fn add(&mut self, vote_type: VoteType, count: i64) {
        match vote_type {
            VoteType::Like => self.likes += count,
            VoteType::Dislike => self.dislikes += count,
        }
    }
}
