//! Requester and actor identities
//!
//! A [`Requester`] is whoever issued the HTTP request, resolved upstream.
//! An [`Actor`] is the identity a reaction or vote row is keyed by.

use crate::entities::User;

use super::{GuestToken, Snowflake};

/// Identity a reaction or vote belongs to. Exactly one of user or guest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Actor {
    Authenticated { user_id: Snowflake },
    Guest { token: GuestToken },
}

impl Actor {
    pub fn user(user_id: Snowflake) -> Self {
        Self::Authenticated { user_id }
    }

    pub fn guest(token: GuestToken) -> Self {
        Self::Guest { token }
    }

    /// `(user_id, guest_token)` column pair for storage
    pub fn columns(&self) -> (Option<i64>, Option<&str>) {
        match self {
            Self::Authenticated { user_id } => (Some(user_id.into_inner()), None),
            Self::Guest { token } => (None, Some(token.as_str())),
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest { .. })
    }
}

/// Resolved identity of the caller
#[derive(Debug, Clone, Default)]
pub enum Requester {
    /// Bearer token resolved to an active account
    Authenticated(User),
    /// No account, but a guest token was supplied
    Guest(GuestToken),
    #[default]
    Anonymous,
}

impl Requester {
    /// Build from an optional account and an optional guest token.
    /// An account always wins over a guest token.
    pub fn resolve(user: Option<User>, guest_token: Option<GuestToken>) -> Self {
        match (user, guest_token) {
            (Some(user), _) => Self::Authenticated(user),
            (None, Some(token)) => Self::Guest(token),
            (None, None) => Self::Anonymous,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn user_id(&self) -> Option<Snowflake> {
        self.user().map(|u| u.id)
    }

    pub fn guest_token(&self) -> Option<&GuestToken> {
        match self {
            Self::Guest(token) => Some(token),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(User::is_admin)
    }

    /// Actor used to look up the caller's own reactions and votes
    pub fn actor(&self) -> Option<Actor> {
        match self {
            Self::Authenticated(user) => Some(Actor::user(user.id)),
            Self::Guest(token) => Some(Actor::guest(token.clone())),
            Self::Anonymous => None,
        }
    }
}
