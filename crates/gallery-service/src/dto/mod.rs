//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers applying the comment visibility rules

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    parse_flag, BatchVotesRequest, CreateCommentRequest, DeleteCommentRequest, GuestTokenQuery,
    ReactorsQuery, ToggleReactionRequest, ToggleVoteRequest, UpdateCommentRequest, MAX_BATCH_IDS,
};

pub use responses::{
    CommentResponse, DeleteResponse, HealthChecks, HealthResponse, ReactionState,
    ReactionSummary, ReactionToggleResponse, ReactorResponse, ReadinessResponse, RealAuthor,
    ToggleAction, VoteSummary, VoteToggleResponse,
};
