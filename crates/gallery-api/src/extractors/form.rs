//! Comment submission extractor
//!
//! `POST /photos/:photo_id/comments` takes either a JSON body or a
//! `multipart/form-data` form with an optional `image` file field.

use axum::{
    async_trait,
    extract::{
        multipart::{Field, MultipartError},
        FromRef, FromRequest, Multipart, Request,
    },
    http::header,
};
use gallery_core::{ImageKind, ImageUpload};
use gallery_service::dto::{parse_flag, CreateCommentRequest};
use validator::Validate;

use crate::response::ApiError;
use crate::state::AppState;

use super::OptionalValidatedJson;

/// A validated comment submission, image included
#[derive(Debug, Clone)]
pub struct CommentForm(pub CreateCommentRequest);

#[async_trait]
impl<S> FromRequest<S> for CommentForm
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let body = OptionalValidatedJson::<CreateCommentRequest>::from_request(req, state)
                .await?
                .into_inner_or_default();
            return Ok(Self(body));
        }

        let max_bytes = AppState::from_ref(state).max_upload_bytes();
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        read_form(multipart, max_bytes).await.map(Self)
    }
}

/// Collect the known form fields. Unknown fields are skipped.
pub(crate) async fn read_form(
    mut multipart: Multipart,
    max_image_bytes: usize,
) -> Result<CreateCommentRequest, ApiError> {
    let mut request = CreateCommentRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => request.image = read_image(field, max_image_bytes).await?,
            "content" => request.content = Some(text(field).await?),
            "guestName" => request.guest_name = Some(text(field).await?),
            "isAnonymous" => request.is_anonymous = parse_flag(&text(field).await?),
            "parentId" => {
                let raw = text(field).await?;
                let raw = raw.trim();
                if !raw.is_empty() {
                    let parent_id = raw
                        .parse()
                        .map_err(|_| ApiError::invalid_body("Invalid parentId"))?;
                    request.parent_id = Some(parent_id);
                }
            }
            _ => {}
        }
    }

    request.validate()?;
    Ok(request)
}

async fn text(field: Field<'_>) -> Result<String, ApiError> {
    field.text().await.map_err(multipart_error)
}

/// An empty file input (no file name) counts as no image
async fn read_image(
    mut field: Field<'_>,
    max_bytes: usize,
) -> Result<Option<ImageUpload>, ApiError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    if file_name.is_empty() {
        return Ok(None);
    }
    let kind = ImageKind::detect(&file_name, field.content_type())?;

    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if bytes.len() + chunk.len() > max_bytes {
            return Err(ApiError::PayloadTooLarge {
                max_mb: max_bytes / (1024 * 1024),
            });
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(Some(ImageUpload { kind, bytes }))
}

fn multipart_error(e: MultipartError) -> ApiError {
    ApiError::invalid_body(e.body_text())
}
