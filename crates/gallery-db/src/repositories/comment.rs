//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use gallery_core::entities::{Comment, CommentWithAuthor};
use gallery_core::error::DomainError;
use gallery_core::traits::{CommentRepository, RepoResult};
use gallery_core::value_objects::Snowflake;

use crate::mappers::CommentInsert;
use crate::models::{CommentModel, CommentWithAuthorModel};

use super::error::{map_db_error, map_foreign_key_violation};

const COMMENT_COLUMNS: &str = "c.id, c.photo_id, c.parent_id, c.user_id, c.guest_name, \
     c.guest_token, c.content, c.image_url, c.is_anonymous, c.created_at, c.updated_at";

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn list_by_photo(&self, photo_id: Snowflake) -> RepoResult<Vec<CommentWithAuthor>> {
        let sql = format!(
            r"
            SELECT {COMMENT_COLUMNS},
                   u.username AS author_username, u.name AS author_name,
                   u.avatar AS author_avatar, u.role AS author_role,
                   u.is_active AS author_is_active
            FROM photo_comments c
            LEFT JOIN users u ON u.id = c.user_id
            WHERE c.photo_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            "
        );

        let rows = sqlx::query_as::<_, CommentWithAuthorModel>(&sql)
            .bind(photo_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(CommentWithAuthor::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM photo_comments c WHERE c.id = $1");

        let result = sqlx::query_as::<_, CommentModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Comment::try_from).transpose()
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let insert = CommentInsert::new(comment);

        sqlx::query(
            r"
            INSERT INTO photo_comments (
                id, photo_id, parent_id, user_id, guest_name, guest_token,
                content, image_url, is_anonymous, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(insert.id)
        .bind(insert.photo_id)
        .bind(insert.parent_id)
        .bind(insert.user_id)
        .bind(insert.guest_name)
        .bind(insert.guest_token)
        .bind(insert.content)
        .bind(insert.image_url)
        .bind(insert.is_anonymous)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, |constraint| match constraint {
                Some(name) if name.contains("parent") => {
                    DomainError::ParentNotFound(comment.parent_id.unwrap_or_default())
                }
                Some(name) if name.contains("user") => DomainError::UserNotFound(
                    comment.user_id().unwrap_or_default(),
                ),
                _ => DomainError::PhotoNotFound,
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, content))]
    async fn update_content(
        &self,
        id: Snowflake,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE photo_comments
            SET content = $2, updated_at = $3
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(content)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CommentNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Replies first; reactions and votes follow through ON DELETE CASCADE
        sqlx::query("DELETE FROM photo_comments WHERE parent_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM photo_comments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Err(DomainError::CommentNotFound(id));
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}
