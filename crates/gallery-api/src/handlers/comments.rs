//! Comment handlers
//!
//! Endpoints for listing, posting, editing and deleting photo comments.

use axum::{
    extract::{Path, State},
    Json,
};
use gallery_service::dto::{
    CommentResponse, DeleteCommentRequest, DeleteResponse, UpdateCommentRequest,
};
use gallery_service::CommentService;

use crate::extractors::{
    CommentForm, Identity, OptionalValidatedJson, PhotoCommentPath, PhotoPath, ValidatedJson,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List a photo's comments, newest thread first
///
/// GET /photos/{photo_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(path): Path<PhotoPath>,
    Identity(requester): Identity,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let photo_id = path.photo_id()?;

    let comments = CommentService::new(state.service_context())
        .list(photo_id, &requester)
        .await?;
    Ok(Json(comments))
}

/// Post a comment or reply, JSON or multipart with an image
///
/// POST /photos/{photo_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Path(path): Path<PhotoPath>,
    Identity(requester): Identity,
    CommentForm(request): CommentForm,
) -> ApiResult<Created<CommentResponse>> {
    let photo_id = path.photo_id()?;

    let comment = CommentService::new(state.service_context())
        .submit(photo_id, request, &requester)
        .await?;
    Ok(Created(comment))
}

/// Edit a comment within the edit window
///
/// PATCH /photos/{photo_id}/comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    Path(path): Path<PhotoCommentPath>,
    Identity(requester): Identity,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let photo_id = path.photo_id()?;
    let comment_id = path.comment_id()?;

    let comment = CommentService::new(state.service_context())
        .update(photo_id, comment_id, request, &requester)
        .await?;
    Ok(Json(comment))
}

/// Delete a comment and its replies
///
/// DELETE /photos/{photo_id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(path): Path<PhotoCommentPath>,
    Identity(requester): Identity,
    body: OptionalValidatedJson<DeleteCommentRequest>,
) -> ApiResult<Json<DeleteResponse>> {
    let photo_id = path.photo_id()?;
    let comment_id = path.comment_id()?;
    let body = body.into_inner_or_default();

    CommentService::new(state.service_context())
        .delete(photo_id, comment_id, &requester, body.guest_token.as_deref())
        .await?;
    Ok(Json(DeleteResponse::deleted()))
}
