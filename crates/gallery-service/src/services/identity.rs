//! Identity service
//!
//! Resolves request credentials into a [`Requester`]: a bearer token to an
//! active account, otherwise an optional guest token.

use gallery_core::entities::User;
use gallery_core::{GuestToken, Requester};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Identity service
pub struct IdentityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IdentityService<'a> {
    /// Create a new IdentityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate a bearer token and load its account.
    /// Unknown and deactivated accounts are rejected like a bad token.
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let user_id = self.ctx.jwt_service().validate(token)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| {
                debug!(user_id = %user_id, "Token subject missing or inactive");
                ServiceError::unauthorized("User not found or inactive")
            })?;

        Ok(user)
    }

    /// Resolve the caller. An account wins over a guest token; a blank or
    /// oversized guest token is ignored.
    #[instrument(skip_all)]
    pub async fn resolve(
        &self,
        bearer: Option<&str>,
        guest_token: Option<&str>,
    ) -> ServiceResult<Requester> {
        let user = match bearer {
            Some(token) => Some(self.authenticate(token).await?),
            None => None,
        };

        Ok(Requester::resolve(
            user,
            guest_token.and_then(GuestToken::parse),
        ))
    }
}
