//! User entity <-> model mapper

use gallery_core::entities::{Role, User};
use gallery_core::value_objects::Snowflake;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            name: model.name,
            username: model.username,
            avatar: model.avatar,
            role: Role::from_db(&model.role),
            is_active: model.is_active,
        }
    }
}
