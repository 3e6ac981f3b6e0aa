//! User database model

use sqlx::FromRow;

/// Database model for the columns of `users` this subsystem reads
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub role: String,
    pub is_active: bool,
}
