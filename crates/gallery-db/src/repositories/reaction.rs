//! PostgreSQL implementation of ReactionRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gallery_core::entities::{Reaction, ReactionCount, Reactor};
use gallery_core::error::DomainError;
use gallery_core::traits::{ReactionRepository, RepoResult};
use gallery_core::value_objects::{Actor, Snowflake};

use crate::models::{ActorEmojiModel, ReactionCountModel, ReactionModel, ReactorModel};

use super::actor::{actor_column, bind_actor};
use super::error::{map_db_error, map_insert_error};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn raw_ids(ids: &[Snowflake]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn count_by_emoji(&self, comment_id: Snowflake) -> RepoResult<Vec<ReactionCount>> {
        let results = sqlx::query_as::<_, ReactionCountModel>(
            r"
            SELECT comment_id, emoji, COUNT(*) AS count
            FROM comment_reactions
            WHERE comment_id = $1
            GROUP BY comment_id, emoji
            ORDER BY MIN(created_at)
            ",
        )
        .bind(comment_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ReactionCount::from).collect())
    }

    #[instrument(skip(self), fields(count = comment_ids.len()))]
    async fn count_by_emoji_batch(
        &self,
        comment_ids: &[Snowflake],
    ) -> RepoResult<HashMap<Snowflake, Vec<ReactionCount>>> {
        if comment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let results = sqlx::query_as::<_, ReactionCountModel>(
            r"
            SELECT comment_id, emoji, COUNT(*) AS count
            FROM comment_reactions
            WHERE comment_id = ANY($1)
            GROUP BY comment_id, emoji
            ORDER BY comment_id, MIN(created_at)
            ",
        )
        .bind(raw_ids(comment_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut counts: HashMap<Snowflake, Vec<ReactionCount>> = HashMap::new();
        for row in results {
            counts
                .entry(Snowflake::new(row.comment_id))
                .or_default()
                .push(ReactionCount::from(row));
        }
        Ok(counts)
    }

    #[instrument(skip(self))]
    async fn emojis_by_actor(
        &self,
        comment_id: Snowflake,
        actor: &Actor,
    ) -> RepoResult<Vec<String>> {
        let sql = format!(
            "SELECT comment_id, emoji FROM comment_reactions WHERE comment_id = $1 AND {} = $2",
            actor_column(actor)
        );

        let query = sqlx::query_as::<_, ActorEmojiModel>(&sql).bind(comment_id.into_inner());
        let results = bind_actor(query, actor)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(|r| r.emoji).collect())
    }

    #[instrument(skip(self), fields(count = comment_ids.len()))]
    async fn emojis_by_actor_batch(
        &self,
        comment_ids: &[Snowflake],
        actor: &Actor,
    ) -> RepoResult<HashMap<Snowflake, Vec<String>>> {
        if comment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT comment_id, emoji FROM comment_reactions \
             WHERE comment_id = ANY($1) AND {} = $2",
            actor_column(actor)
        );

        let query = sqlx::query_as::<_, ActorEmojiModel>(&sql).bind(raw_ids(comment_ids));
        let results = bind_actor(query, actor)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut emojis: HashMap<Snowflake, Vec<String>> = HashMap::new();
        for row in results {
            emojis
                .entry(Snowflake::new(row.comment_id))
                .or_default()
                .push(row.emoji);
        }
        Ok(emojis)
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        comment_id: Snowflake,
        actor: &Actor,
        emoji: &str,
    ) -> RepoResult<Option<Reaction>> {
        let sql = format!(
            r"
            SELECT id, comment_id, user_id, guest_token, emoji, created_at
            FROM comment_reactions
            WHERE comment_id = $1 AND emoji = $2 AND {} = $3
            ",
            actor_column(actor)
        );

        let query = sqlx::query_as::<_, ReactionModel>(&sql)
            .bind(comment_id.into_inner())
            .bind(emoji);
        let result = bind_actor(query, actor)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self, reaction), fields(comment_id = %reaction.comment_id, emoji = %reaction.emoji))]
    async fn create(&self, reaction: &Reaction) -> RepoResult<()> {
        let (user_id, guest_token) = reaction.actor.columns();

        sqlx::query(
            r"
            INSERT INTO comment_reactions (id, comment_id, user_id, guest_token, emoji, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(reaction.id.into_inner())
        .bind(reaction.comment_id.into_inner())
        .bind(user_id)
        .bind(guest_token)
        .bind(&reaction.emoji)
        .bind(reaction.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                || DomainError::ReactionAlreadyExists,
                |_| DomainError::CommentNotFound(reaction.comment_id),
            )
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM comment_reactions WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn find_reactors(&self, comment_id: Snowflake, emoji: &str) -> RepoResult<Vec<Reactor>> {
        let results = sqlx::query_as::<_, ReactorModel>(
            r"
            SELECT r.user_id, u.name AS user_name, u.username AS user_username
            FROM comment_reactions r
            LEFT JOIN users u ON u.id = r.user_id
            WHERE r.comment_id = $1 AND r.emoji = $2
            ORDER BY r.created_at, r.id
            ",
        )
        .bind(comment_id.into_inner())
        .bind(emoji)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Reactor::from).collect())
    }
}
