//! Reaction service
//!
//! Emoji reactions on comments: aggregates, toggling, and reactor lists.
//! Only signed-in members may react; guest tokens are honored for reads.

use gallery_core::entities::Reaction;
use gallery_core::{Actor, DomainError, Requester, Snowflake};
use tracing::{debug, info, instrument};

use crate::dto::{ReactionSummary, ReactionToggleResponse, ReactorResponse, ToggleAction};

use super::aggregates::reaction_summary;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Per-emoji counts plus the requester's own membership
    #[instrument(skip(self, requester))]
    pub async fn get(
        &self,
        comment_id: Snowflake,
        requester: &Requester,
    ) -> ServiceResult<ReactionSummary> {
        reaction_summary(self.ctx, comment_id, requester.actor().as_ref()).await
    }

    /// Add the reaction if the member has not placed it, remove it otherwise.
    ///
    /// A concurrent toggle that inserted the same row first is reported as
    /// `added`; a row that vanished before our delete as `removed`.
    #[instrument(skip(self, requester))]
    pub async fn toggle(
        &self,
        comment_id: Snowflake,
        emoji: Option<&str>,
        requester: &Requester,
    ) -> ServiceResult<ReactionToggleResponse> {
        let actor = match requester.user() {
            Some(user) => Actor::user(user.id),
            None => {
                return Err(
                    DomainError::AuthenticationRequired("Authentication required to react").into(),
                )
            }
        };

        let allowed = &self.ctx.policy().reactions;
        let emoji = emoji
            .map(str::trim)
            .filter(|emoji| allowed.contains(emoji))
            .ok_or_else(|| DomainError::InvalidReaction {
                allowed: allowed.joined(),
            })?;

        self.ensure_comment(comment_id).await?;

        let repo = self.ctx.reaction_repo();
        let action = match repo.find(comment_id, &actor, emoji).await? {
            Some(existing) => {
                if !repo.delete(existing.id).await? {
                    debug!(comment_id = %comment_id, emoji, "Reaction already removed");
                }
                ToggleAction::Removed
            }
            None => {
                let reaction = Reaction::new(
                    self.ctx.generate_id(),
                    comment_id,
                    actor.clone(),
                    emoji,
                    self.ctx.now(),
                );
                match repo.create(&reaction).await {
                    Ok(()) => {}
                    Err(DomainError::ReactionAlreadyExists) => {
                        debug!(comment_id = %comment_id, emoji, "Reaction added concurrently");
                    }
                    Err(e) => return Err(e.into()),
                }
                ToggleAction::Added
            }
        };

        info!(comment_id = %comment_id, emoji, action = ?action, "Reaction toggled");

        let reactions = reaction_summary(self.ctx, comment_id, Some(&actor)).await?;
        Ok(ReactionToggleResponse { action, reactions })
    }

    /// Who reacted with `emoji`, oldest first. Guests all show as "Guest".
    #[instrument(skip(self))]
    pub async fn reactors(
        &self,
        comment_id: Snowflake,
        emoji: Option<&str>,
    ) -> ServiceResult<Vec<ReactorResponse>> {
        let emoji = emoji
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ServiceError::validation("emoji query parameter is required"))?;

        let reactors = self.ctx.reaction_repo().find_reactors(comment_id, emoji).await?;
        Ok(reactors.into_iter().map(ReactorResponse::from).collect())
    }

    async fn ensure_comment(&self, comment_id: Snowflake) -> ServiceResult<()> {
        match self.ctx.comment_repo().find_by_id(comment_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::CommentNotFound(comment_id).into()),
        }
    }
}
