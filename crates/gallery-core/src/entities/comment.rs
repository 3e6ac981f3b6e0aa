//! Comment entity - a photo comment or a one-level reply

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{GuestToken, Requester, Snowflake};

use super::User;

/// Longest accepted comment body, in characters
pub const MAX_CONTENT_LEN: usize = 5000;

/// Longest accepted guest display name, in characters
pub const MAX_GUEST_NAME_LEN: usize = 100;

/// Who wrote a comment. Never both an account and a guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentAuthor {
    Member { user_id: Snowflake },
    Guest { name: String, token: GuestToken },
}

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub photo_id: Snowflake,
    pub parent_id: Option<Snowflake>,
    pub author: CommentAuthor,
    pub content: String,
    pub image_url: Option<String>,
    /// Only meaningful for member authors
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Create a comment by an authenticated member
    pub fn by_member(
        id: Snowflake,
        photo_id: Snowflake,
        user_id: Snowflake,
        content: String,
        is_anonymous: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            photo_id,
            parent_id: None,
            author: CommentAuthor::Member { user_id },
            content,
            image_url: None,
            is_anonymous,
            created_at,
            updated_at: None,
        }
    }

    /// Create a comment by a guest; guests are never anonymous
    pub fn by_guest(
        id: Snowflake,
        photo_id: Snowflake,
        name: String,
        token: GuestToken,
        content: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            photo_id,
            parent_id: None,
            author: CommentAuthor::Guest { name, token },
            content,
            image_url: None,
            is_anonymous: false,
            created_at,
            updated_at: None,
        }
    }

    pub fn with_parent(mut self, parent_id: Option<Snowflake>) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn with_image(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    #[inline]
    pub fn is_guest(&self) -> bool {
        matches!(self.author, CommentAuthor::Guest { .. })
    }

    pub fn user_id(&self) -> Option<Snowflake> {
        match &self.author {
            CommentAuthor::Member { user_id } => Some(*user_id),
            CommentAuthor::Guest { .. } => None,
        }
    }

    pub fn guest_token(&self) -> Option<&GuestToken> {
        match &self.author {
            CommentAuthor::Guest { token, .. } => Some(token),
            CommentAuthor::Member { .. } => None,
        }
    }

    /// Guest display name, `"Guest"` when blank
    pub fn guest_name(&self) -> Option<&str> {
        match &self.author {
            CommentAuthor::Guest { name, .. } if name.trim().is_empty() => Some("Guest"),
            CommentAuthor::Guest { name, .. } => Some(name),
            CommentAuthor::Member { .. } => None,
        }
    }

    #[inline]
    pub fn belongs_to(&self, photo_id: Snowflake) -> bool {
        self.photo_id == photo_id
    }

    /// Ownership by account id, or by a matching guest token on a guest comment.
    /// `guest_token` is consulted in addition to the requester's own token so
    /// callers can pass a token from the request body.
    pub fn is_owned_by(&self, requester: &Requester, guest_token: Option<&GuestToken>) -> bool {
        match &self.author {
            CommentAuthor::Member { user_id } => requester.user_id() == Some(*user_id),
            CommentAuthor::Guest { token, .. } => guest_token
                .or_else(|| requester.guest_token())
                .is_some_and(|supplied| supplied.matches(token)),
        }
    }

    /// Replace the body and stamp the edit time
    pub fn edit(&mut self, content: String, now: DateTime<Utc>) {
        self.content = content;
        self.updated_at = Some(now);
    }
}

/// Comment joined with its member author's profile (if any and still present)
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: Option<User>,
}

/// Trim and validate a comment body
pub fn normalize_content(raw: Option<&str>) -> Result<String, DomainError> {
    let content = raw.map(str::trim).unwrap_or_default();
    if content.is_empty() {
        return Err(DomainError::EmptyContent);
    }
    if content.chars().count() > MAX_CONTENT_LEN {
        return Err(DomainError::ContentTooLong { max: MAX_CONTENT_LEN });
    }
    Ok(content.to_string())
}

/// Trim and validate a guest display name
pub fn normalize_guest_name(raw: Option<&str>) -> Result<String, DomainError> {
    let name = raw.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(DomainError::GuestNameRequired);
    }
    if name.chars().count() > MAX_GUEST_NAME_LEN {
        return Err(DomainError::ValidationError(format!(
            "Guest name must be at most {MAX_GUEST_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}
