//! Vote handlers
//!
//! Endpoints for like/dislike votes on comments.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use gallery_core::Snowflake;
use gallery_service::dto::{
    BatchVotesRequest, ToggleVoteRequest, VoteSummary, VoteToggleResponse,
};
use gallery_service::VoteService;

use crate::extractors::{CommentPath, Identity, OptionalValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Vote totals and the caller's own vote
///
/// GET /comments/{comment_id}/votes
pub async fn get_votes(
    State(state): State<AppState>,
    Path(path): Path<CommentPath>,
    Identity(requester): Identity,
) -> ApiResult<Json<VoteSummary>> {
    let comment_id = path.comment_id()?;

    let votes = VoteService::new(state.service_context())
        .get(comment_id, &requester)
        .await?;
    Ok(Json(votes))
}

/// Cast, switch or withdraw the caller's vote
///
/// POST /comments/{comment_id}/votes
pub async fn toggle_vote(
    State(state): State<AppState>,
    Path(path): Path<CommentPath>,
    identity: Identity,
    body: OptionalValidatedJson<ToggleVoteRequest>,
) -> ApiResult<Json<VoteToggleResponse>> {
    let comment_id = path.comment_id()?;
    let body = body.into_inner_or_default();
    let requester = identity.with_body_token(body.guest_token.as_deref());

    let response = VoteService::new(state.service_context())
        .toggle(comment_id, body.vote_type.as_deref(), &requester)
        .await?;
    Ok(Json(response))
}

/// Vote summaries keyed by comment id
///
/// POST /comments/votes/batch
pub async fn batch_votes(
    State(state): State<AppState>,
    identity: Identity,
    body: OptionalValidatedJson<BatchVotesRequest>,
) -> ApiResult<Json<BTreeMap<Snowflake, VoteSummary>>> {
    let body = body.into_inner_or_default();
    let requester = identity.with_body_token(body.guest_token.as_deref());

    let votes = VoteService::new(state.service_context())
        .batch(body.comment_ids, &requester)
        .await?;
    Ok(Json(votes))
}
