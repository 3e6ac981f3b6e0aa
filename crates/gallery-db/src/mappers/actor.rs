//! Actor <-> `(user_id, guest_token)` column pair

use gallery_core::error::DomainError;
use gallery_core::value_objects::{Actor, GuestToken, Snowflake};

/// Rebuild an actor from its nullable columns. Exactly one must be set.
pub fn actor_from_columns(
    user_id: Option<i64>,
    guest_token: Option<String>,
) -> Result<Actor, DomainError> {
    match (user_id, guest_token.as_deref().and_then(GuestToken::parse)) {
        (Some(id), None) => Ok(Actor::user(Snowflake::new(id))),
        (None, Some(token)) => Ok(Actor::guest(token)),
        _ => Err(DomainError::DatabaseError(
            "row must reference exactly one of user_id or guest_token".to_string(),
        )),
    }
}
