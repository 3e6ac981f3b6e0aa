//! PostgreSQL implementation of VoteRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gallery_core::entities::{Vote, VoteTally, VoteType};
use gallery_core::error::DomainError;
use gallery_core::traits::{RepoResult, VoteRepository};
use gallery_core::value_objects::{Actor, Snowflake};

use crate::mappers::vote_type_from_db;
use crate::models::{ActorVoteModel, VoteCountModel, VoteModel};

use super::actor::{actor_column, bind_actor};
use super::error::{map_db_error, map_insert_error};

/// PostgreSQL implementation of VoteRepository
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn counts(&self, comment_ids: Vec<i64>) -> RepoResult<Vec<VoteCountModel>> {
        sqlx::query_as::<_, VoteCountModel>(
            r"
            SELECT comment_id, vote_type, COUNT(*) AS count
            FROM comment_votes
            WHERE comment_id = ANY($1)
            GROUP BY comment_id, vote_type
            ",
        )
        .bind(comment_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self))]
    async fn tally(&self, comment_id: Snowflake) -> RepoResult<VoteTally> {
        let mut tally = VoteTally::default();
        for row in self.counts(vec![comment_id.into_inner()]).await? {
            tally.add(vote_type_from_db(&row.vote_type)?, row.count);
        }
        Ok(tally)
    }

    #[instrument(skip(self), fields(count = comment_ids.len()))]
    async fn tally_batch(
        &self,
        comment_ids: &[Snowflake],
    ) -> RepoResult<HashMap<Snowflake, VoteTally>> {
        if comment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let raw = comment_ids.iter().map(|id| id.into_inner()).collect();
        let mut tallies: HashMap<Snowflake, VoteTally> = HashMap::new();
        for row in self.counts(raw).await? {
            tallies
                .entry(Snowflake::new(row.comment_id))
                .or_default()
                .add(vote_type_from_db(&row.vote_type)?, row.count);
        }
        Ok(tallies)
    }

    #[instrument(skip(self))]
    async fn find(&self, comment_id: Snowflake, actor: &Actor) -> RepoResult<Option<Vote>> {
        let sql = format!(
            r"
            SELECT id, comment_id, user_id, guest_token, vote_type, created_at
            FROM comment_votes
            WHERE comment_id = $1 AND {} = $2
            ",
            actor_column(actor)
        );

        let query = sqlx::query_as::<_, VoteModel>(&sql).bind(comment_id.into_inner());
        let result = bind_actor(query, actor)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Vote::try_from).transpose()
    }

    #[instrument(skip(self), fields(count = comment_ids.len()))]
    async fn vote_types_by_actor_batch(
        &self,
        comment_ids: &[Snowflake],
        actor: &Actor,
    ) -> RepoResult<HashMap<Snowflake, VoteType>> {
        if comment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT comment_id, vote_type FROM comment_votes \
             WHERE comment_id = ANY($1) AND {} = $2",
            actor_column(actor)
        );

        let raw: Vec<i64> = comment_ids.iter().map(|id| id.into_inner()).collect();
        let query = sqlx::query_as::<_, ActorVoteModel>(&sql).bind(raw);
        let results = bind_actor(query, actor)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        results
            .into_iter()
            .map(|row| Ok((Snowflake::new(row.comment_id), vote_type_from_db(&row.vote_type)?)))
            .collect()
    }

    #[instrument(skip(self, vote), fields(comment_id = %vote.comment_id, vote_type = %vote.vote_type))]
    async fn create(&self, vote: &Vote) -> RepoResult<()> {
        let (user_id, guest_token) = vote.actor.columns();

        sqlx::query(
            r"
            INSERT INTO comment_votes (id, comment_id, user_id, guest_token, vote_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(vote.id.into_inner())
        .bind(vote.comment_id.into_inner())
        .bind(user_id)
        .bind(guest_token)
        .bind(vote.vote_type.as_str())
        .bind(vote.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                || DomainError::VoteAlreadyExists,
                |_| DomainError::CommentNotFound(vote.comment_id),
            )
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn change_type(&self, id: Snowflake, vote_type: VoteType) -> RepoResult<bool> {
        let result = sqlx::query("UPDATE comment_votes SET vote_type = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(vote_type.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM comment_votes WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
