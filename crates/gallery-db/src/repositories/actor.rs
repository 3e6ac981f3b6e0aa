//! Binding an [`Actor`] into a query

use gallery_core::value_objects::Actor;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;

/// Column identifying the actor kind. Matches the partial unique indexes.
pub fn actor_column(actor: &Actor) -> &'static str {
    match actor {
        Actor::Authenticated { .. } => "user_id",
        Actor::Guest { .. } => "guest_token",
    }
}

/// Bind the actor's id or token as the next parameter
pub fn bind_actor<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    actor: &'q Actor,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    match actor {
        Actor::Authenticated { user_id } => query.bind(user_id.into_inner()),
        Actor::Guest { token } => query.bind(token.as_str()),
    }
}
