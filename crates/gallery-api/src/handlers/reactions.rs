//! Reaction handlers
//!
//! Endpoints for emoji reactions on comments.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use gallery_service::dto::{
    ReactionSummary, ReactionToggleResponse, ReactorResponse, ReactorsQuery,
    ToggleReactionRequest,
};
use gallery_service::ReactionService;

use crate::extractors::{CommentPath, Identity, OptionalValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Reaction counts and the caller's own reactions
///
/// GET /comments/{comment_id}/reactions
pub async fn get_reactions(
    State(state): State<AppState>,
    Path(path): Path<CommentPath>,
    Identity(requester): Identity,
) -> ApiResult<Json<ReactionSummary>> {
    let comment_id = path.comment_id()?;

    let reactions = ReactionService::new(state.service_context())
        .get(comment_id, &requester)
        .await?;
    Ok(Json(reactions))
}

/// Add or remove one of the caller's reactions
///
/// POST /comments/{comment_id}/reactions
pub async fn toggle_reaction(
    State(state): State<AppState>,
    Path(path): Path<CommentPath>,
    identity: Identity,
    body: OptionalValidatedJson<ToggleReactionRequest>,
) -> ApiResult<Json<ReactionToggleResponse>> {
    let comment_id = path.comment_id()?;
    let body = body.into_inner_or_default();
    let requester = identity.with_body_token(body.guest_token.as_deref());

    let response = ReactionService::new(state.service_context())
        .toggle(comment_id, body.emoji.as_deref(), &requester)
        .await?;
    Ok(Json(response))
}

/// Who reacted with a given emoji
///
/// GET /comments/{comment_id}/reactors?emoji=
pub async fn get_reactors(
    State(state): State<AppState>,
    Path(path): Path<CommentPath>,
    Query(query): Query<ReactorsQuery>,
) -> ApiResult<Json<Vec<ReactorResponse>>> {
    let comment_id = path.comment_id()?;

    let reactors = ReactionService::new(state.service_context())
        .reactors(comment_id, query.emoji.as_deref())
        .await?;
    Ok(Json(reactors))
}
