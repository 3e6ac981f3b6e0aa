//! Vote entity <-> model mapper

use gallery_core::entities::{Vote, VoteType};
use gallery_core::error::DomainError;
use gallery_core::value_objects::Snowflake;

use crate::models::VoteModel;

use super::actor::actor_from_columns;

/// Parse a stored vote type; the column CHECK makes failure a data error
pub fn vote_type_from_db(value: &str) -> Result<VoteType, DomainError> {
    value
        .parse()
        .map_err(|_| DomainError::DatabaseError(format!("unknown vote type {value:?}")))
}

impl TryFrom<VoteModel> for Vote {
    type Error = DomainError;

    fn try_from(model: VoteModel) -> Result<Self, Self::Error> {
        Ok(Vote {
            id: Snowflake::new(model.id),
            comment_id: Snowflake::new(model.comment_id),
            actor: actor_from_columns(model.user_id, model.guest_token)?,
            vote_type: vote_type_from_db(&model.vote_type)?,
            created_at: model.created_at,
        })
    }
}
