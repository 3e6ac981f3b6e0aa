//! Vote service
//!
//! One like/dislike slot per member per comment. Toggling the same type
//! clears the slot; toggling the other type switches it in place.

use std::collections::{BTreeMap, HashSet};

use gallery_core::entities::Vote;
use gallery_core::{Actor, DomainError, Requester, Snowflake, VoteType};
use tracing::{debug, info, instrument};

use crate::dto::{ToggleAction, VoteSummary, VoteToggleResponse, MAX_BATCH_IDS};

use super::aggregates::{vote_summaries, vote_summary};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Like/dislike totals plus the requester's own vote
    #[instrument(skip(self, requester))]
    pub async fn get(
        &self,
        comment_id: Snowflake,
        requester: &Requester,
    ) -> ServiceResult<VoteSummary> {
        vote_summary(self.ctx, comment_id, requester.actor().as_ref()).await
    }

    /// Cycle the member's vote: none → added, same type → removed,
    /// other type → switched (a single in-place update).
    #[instrument(skip(self, requester))]
    pub async fn toggle(
        &self,
        comment_id: Snowflake,
        vote_type: Option<&str>,
        requester: &Requester,
    ) -> ServiceResult<VoteToggleResponse> {
        let actor = match requester.user() {
            Some(user) => Actor::user(user.id),
            None => {
                return Err(
                    DomainError::AuthenticationRequired("Authentication required to vote").into(),
                )
            }
        };

        let vote_type: VoteType = vote_type
            .ok_or(DomainError::InvalidVoteType)?
            .trim()
            .parse()?;

        if self.ctx.comment_repo().find_by_id(comment_id).await?.is_none() {
            return Err(DomainError::CommentNotFound(comment_id).into());
        }

        let repo = self.ctx.vote_repo();
        let action = match repo.find(comment_id, &actor).await? {
            None => {
                let vote = Vote::new(
                    self.ctx.generate_id(),
                    comment_id,
                    actor.clone(),
                    vote_type,
                    self.ctx.now(),
                );
                match repo.create(&vote).await {
                    Ok(()) => {}
                    Err(DomainError::VoteAlreadyExists) => {
                        debug!(comment_id = %comment_id, "Vote added concurrently");
                    }
                    Err(e) => return Err(e.into()),
                }
                ToggleAction::Added
            }
            Some(existing) if existing.vote_type == vote_type => {
                if !repo.delete(existing.id).await? {
                    debug!(comment_id = %comment_id, "Vote already removed");
                }
                ToggleAction::Removed
            }
            Some(existing) => {
                if !repo.change_type(existing.id, vote_type).await? {
                    debug!(comment_id = %comment_id, "Vote removed before switch");
                }
                ToggleAction::Switched
            }
        };

        info!(comment_id = %comment_id, vote_type = %vote_type, action = ?action, "Vote toggled");

        let votes = vote_summary(self.ctx, comment_id, Some(&actor)).await?;
        Ok(VoteToggleResponse { action, votes })
    }

    /// Vote summaries for many comments in two queries.
    /// Every requested id is present in the result, zeroed if unvoted.
    #[instrument(skip(self, comment_ids, requester), fields(count = comment_ids.as_ref().map_or(0, Vec::len)))]
    pub async fn batch(
        &self,
        comment_ids: Option<Vec<Snowflake>>,
        requester: &Requester,
    ) -> ServiceResult<BTreeMap<Snowflake, VoteSummary>> {
        let comment_ids = comment_ids
            .filter(|ids| !ids.is_empty())
            .ok_or_else(|| ServiceError::validation("commentIds array is required"))?;

        let mut seen = HashSet::new();
        let unique: Vec<Snowflake> = comment_ids.into_iter().filter(|id| seen.insert(*id)).collect();
        if unique.len() > MAX_BATCH_IDS {
            return Err(ServiceError::validation(format!(
                "At most {MAX_BATCH_IDS} comment ids may be requested at once"
            )));
        }

        let summaries = vote_summaries(self.ctx, &unique, requester.actor().as_ref()).await?;
        Ok(summaries.into_iter().collect())
    }
}
