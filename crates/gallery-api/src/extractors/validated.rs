//! Validated JSON extractor
//!
//! Extracts and validates JSON request bodies using the validator crate.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::header,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

/// JSON body that has passed `Validate`
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| match e {
                JsonRejection::JsonDataError(e) => ApiError::invalid_body(e.body_text()),
                JsonRejection::JsonSyntaxError(e) => ApiError::invalid_body(e.body_text()),
                JsonRejection::MissingJsonContentType(e) => ApiError::invalid_body(e.body_text()),
                _ => ApiError::invalid_body("Invalid JSON body"),
            })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// Like [`ValidatedJson`], but an absent body yields `None`.
/// DELETE and toggle requests often carry no body at all.
#[derive(Debug, Clone)]
pub struct OptionalValidatedJson<T>(pub Option<T>);

impl<T: Default> OptionalValidatedJson<T> {
    pub fn into_inner_or_default(self) -> T {
        self.0.unwrap_or_default()
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for OptionalValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let has_body = req
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<usize>().ok())
            .is_some_and(|len| len > 0)
            || req.headers().contains_key(header::TRANSFER_ENCODING);

        if !has_body {
            return Ok(OptionalValidatedJson(None));
        }

        let ValidatedJson(value) = ValidatedJson::from_request(req, state).await?;
        Ok(OptionalValidatedJson(Some(value)))
    }
}
