//! User entity - account profile as seen by the comment subsystem
//!
//! Accounts are owned by the auth subsystem; this is the read-only slice
//! needed to resolve requesters and render authors.

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Member,
}

impl Role {
    /// Parse a stored role string; unknown values fall back to `Member`
    pub fn from_db(value: &str) -> Self {
        if value.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::Member
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

/// User account profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub name: Option<String>,
    pub username: String,
    pub avatar: Option<String>,
    pub role: Role,
    pub is_active: bool,
}

impl User {
    pub fn new(id: Snowflake, username: impl Into<String>) -> Self {
        Self {
            id,
            name: None,
            username: username.into(),
            avatar: None,
            role: Role::Member,
            is_active: true,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Name shown next to content: display name, else username
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}
