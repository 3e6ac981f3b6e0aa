//! Domain errors - error types for the domain layer
//!
//! Display strings are client-facing and kept stable.

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Comment not found")]
    CommentNotFound(Snowflake),

    #[error("Parent comment not found")]
    ParentNotFound(Snowflake),

    #[error("Photo not found")]
    PhotoNotFound,

    #[error("User not found")]
    UserNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    ValidationError(String),

    #[error("Comment content is required")]
    EmptyContent,

    #[error("Comment content must be at most {max} characters")]
    ContentTooLong { max: usize },

    #[error("Guest name is required")]
    GuestNameRequired,

    #[error("Cannot reply to a reply")]
    ReplyToReply,

    #[error("Invalid reaction. Allowed: {allowed}")]
    InvalidReaction { allowed: String },

    #[error("Invalid vote type. Allowed: like, dislike")]
    InvalidVoteType,

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("{0}")]
    AuthenticationRequired(&'static str),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not authorized to {action} this comment")]
    NotCommentOwner { action: &'static str },

    #[error("Edit window expired")]
    EditWindowExpired,

    #[error("Delete window has expired (1 week limit)")]
    DeleteWindowExpired,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Reaction already exists")]
    ReactionAlreadyExists,

    #[error("Vote already exists")]
    VoteAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::ParentNotFound(_) => "UNKNOWN_PARENT_COMMENT",
            Self::PhotoNotFound => "UNKNOWN_PHOTO",
            Self::UserNotFound(_) => "UNKNOWN_USER",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyContent => "CONTENT_REQUIRED",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::GuestNameRequired => "GUEST_NAME_REQUIRED",
            Self::ReplyToReply => "REPLY_TO_REPLY",
            Self::InvalidReaction { .. } => "INVALID_REACTION",
            Self::InvalidVoteType => "INVALID_VOTE_TYPE",

            // Authentication
            Self::AuthenticationRequired(_) => "AUTHENTICATION_REQUIRED",

            // Authorization
            Self::NotCommentOwner { .. } => "NOT_COMMENT_OWNER",
            Self::EditWindowExpired => "EDIT_WINDOW_EXPIRED",
            Self::DeleteWindowExpired => "DELETE_WINDOW_EXPIRED",

            // Conflict
            Self::ReactionAlreadyExists => "REACTION_ALREADY_EXISTS",
            Self::VoteAlreadyExists => "VOTE_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CommentNotFound(_)
                | Self::ParentNotFound(_)
                | Self::PhotoNotFound
                | Self::UserNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyContent
                | Self::ContentTooLong { .. }
                | Self::GuestNameRequired
                | Self::ReplyToReply
                | Self::InvalidReaction { .. }
                | Self::InvalidVoteType
        )
    }

    /// Check if the caller must authenticate first
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::AuthenticationRequired(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotCommentOwner { .. } | Self::EditWindowExpired | Self::DeleteWindowExpired
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ReactionAlreadyExists | Self::VoteAlreadyExists)
    }

    /// HTTP status for the error's class; infrastructure failures are 500
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_authentication() {
            401
        } else if self.is_authorization() {
            403
        } else if self.is_validation() {
            400
        } else if self.is_conflict() {
            409
        } else {
            500
        }
    }
}
