//! Reaction and vote aggregates shared by the comment, reaction and vote services

use std::collections::HashMap;

use gallery_core::{Actor, Snowflake};

use crate::dto::{ReactionSummary, VoteSummary};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction summary for one comment from the viewpoint of `actor`
pub(crate) async fn reaction_summary(
    ctx: &ServiceContext,
    comment_id: Snowflake,
    actor: Option<&Actor>,
) -> ServiceResult<ReactionSummary> {
    let repo = ctx.reaction_repo();
    let own = async {
        match actor {
            Some(actor) => repo.emojis_by_actor(comment_id, actor).await,
            None => Ok(Vec::new()),
        }
    };

    let (counts, own) = tokio::try_join!(repo.count_by_emoji(comment_id), own)?;
    Ok(ReactionSummary::from_counts(counts, &own))
}

/// Vote summary for one comment from the viewpoint of `actor`
pub(crate) async fn vote_summary(
    ctx: &ServiceContext,
    comment_id: Snowflake,
    actor: Option<&Actor>,
) -> ServiceResult<VoteSummary> {
    let repo = ctx.vote_repo();
    let own = async {
        match actor {
            Some(actor) => repo.vote_type_by_actor(comment_id, actor).await,
            None => Ok(None),
        }
    };

    let (tally, own) = tokio::try_join!(repo.tally(comment_id), own)?;
    Ok(VoteSummary::new(tally, own))
}

/// Reaction summaries for many comments: one count query and one
/// own-reaction query regardless of how many ids are passed.
/// Every requested id gets an entry.
pub(crate) async fn reaction_summaries(
    ctx: &ServiceContext,
    comment_ids: &[Snowflake],
    actor: Option<&Actor>,
) -> ServiceResult<HashMap<Snowflake, ReactionSummary>> {
    let repo = ctx.reaction_repo();
    let own = async {
        match actor {
            Some(actor) => repo.emojis_by_actor_batch(comment_ids, actor).await,
            None => Ok(HashMap::new()),
        }
    };

    let (mut counts, own) = tokio::try_join!(repo.count_by_emoji_batch(comment_ids), own)?;

    Ok(comment_ids
        .iter()
        .map(|id| {
            let counts = counts.remove(id).unwrap_or_default();
            let own = own.get(id).map_or(&[][..], Vec::as_slice);
            (*id, ReactionSummary::from_counts(counts, own))
        })
        .collect())
}

/// Vote summaries for many comments, batched like [`reaction_summaries`]
pub(crate) async fn vote_summaries(
    ctx: &ServiceContext,
    comment_ids: &[Snowflake],
    actor: Option<&Actor>,
) -> ServiceResult<HashMap<Snowflake, VoteSummary>> {
    let repo = ctx.vote_repo();
    let own = async {
        match actor {
            Some(actor) => repo.vote_types_by_actor_batch(comment_ids, actor).await,
            None => Ok(HashMap::new()),
        }
    };

    let (tallies, own) = tokio::try_join!(repo.tally_batch(comment_ids), own)?;

    Ok(comment_ids
        .iter()
        .map(|id| {
            let tally = tallies.get(id).copied().unwrap_or_default();
            (*id, VoteSummary::new(tally, own.get(id).copied()))
        })
        .collect())
}
