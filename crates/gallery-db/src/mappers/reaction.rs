//! Reaction entity <-> model mapper

use gallery_core::entities::{Reaction, ReactionCount, Reactor};
use gallery_core::error::DomainError;
use gallery_core::value_objects::Snowflake;

use crate::models::{ReactionCountModel, ReactionModel, ReactorModel};

use super::actor::actor_from_columns;

impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        Ok(Reaction {
            id: Snowflake::new(model.id),
            comment_id: Snowflake::new(model.comment_id),
            actor: actor_from_columns(model.user_id, model.guest_token)?,
            emoji: model.emoji,
            created_at: model.created_at,
        })
    }
}

impl From<ReactionCountModel> for ReactionCount {
    fn from(model: ReactionCountModel) -> Self {
        ReactionCount::new(model.emoji, model.count)
    }
}

impl From<ReactorModel> for Reactor {
    fn from(model: ReactorModel) -> Self {
        Reactor::new(model.user_name, model.user_username, model.user_id.is_none())
    }
}
