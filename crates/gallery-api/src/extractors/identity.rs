//! Caller identity extractor
//!
//! Resolves the optional `Authorization: Bearer` header and the optional
//! `?guestToken=` query parameter into a [`Requester`].

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Query},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use gallery_core::{GuestToken, Requester};
use gallery_service::dto::GuestTokenQuery;
use gallery_service::IdentityService;

use crate::response::ApiError;
use crate::state::AppState;

/// Whoever issued the request. Never rejects a missing identity; a bearer
/// token that fails validation is a 401.
#[derive(Debug, Clone)]
pub struct Identity(pub Requester);

impl Identity {
    /// Apply a guest token sent in the request body. It wins over the query
    /// parameter but never over an account.
    pub fn with_body_token(self, token: Option<&str>) -> Requester {
        match (self.0, token.and_then(GuestToken::parse)) {
            (Requester::Authenticated(user), _) => Requester::Authenticated(user),
            (_, Some(token)) => Requester::Guest(token),
            (requester, None) => requester,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string());

        let guest_token = Query::<GuestTokenQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(query)| query.guest_token);

        let app_state = AppState::from_ref(state);
        let requester = IdentityService::new(app_state.service_context())
            .resolve(bearer.as_deref(), guest_token.as_deref())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected bearer token");
                ApiError::from(e)
            })?;

        Ok(Identity(requester))
    }
}
