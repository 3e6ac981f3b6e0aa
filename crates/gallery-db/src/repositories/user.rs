//! Read-only access to accounts owned by the user subsystem

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gallery_core::entities::User;
use gallery_core::traits::{RepoResult, UserRepository};
use gallery_core::value_objects::Snowflake;

use crate::models::UserModel;

use super::error::map_db_error;

const SELECT_BY_ID: &str = r"
    SELECT id, username, name, avatar, role, is_active
    FROM users
    WHERE id = $1
";

/// Looks up comment authors and bearer-token subjects
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    /// Inactive accounts are returned too; callers decide what to do with them
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        sqlx::query_as::<_, UserModel>(SELECT_BY_ID)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(User::from))
            .map_err(map_db_error)
    }
}
