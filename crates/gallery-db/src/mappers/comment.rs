//! Comment entity <-> model mapper

use gallery_core::entities::{Comment, CommentAuthor, CommentWithAuthor, Role, User};
use gallery_core::error::DomainError;
use gallery_core::value_objects::{GuestToken, Snowflake};

use crate::models::{CommentModel, CommentWithAuthorModel};

/// Convert CommentModel to Comment entity, enforcing the one-author rule
impl TryFrom<CommentModel> for Comment {
    type Error = DomainError;

    fn try_from(model: CommentModel) -> Result<Self, Self::Error> {
        let token = model.guest_token.as_deref().and_then(GuestToken::parse);
        let author = match (model.user_id, model.guest_name, token) {
            (Some(user_id), None, None) => CommentAuthor::Member {
                user_id: Snowflake::new(user_id),
            },
            (None, Some(name), Some(token)) => CommentAuthor::Guest { name, token },
            _ => {
                return Err(DomainError::DatabaseError(format!(
                    "comment {} has an invalid author",
                    model.id
                )))
            }
        };

        Ok(Comment {
            id: Snowflake::new(model.id),
            photo_id: Snowflake::new(model.photo_id),
            parent_id: model.parent_id.map(Snowflake::new),
            is_anonymous: model.is_anonymous && matches!(author, CommentAuthor::Member { .. }),
            author,
            content: model.content,
            image_url: model.image_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<CommentWithAuthorModel> for CommentWithAuthor {
    type Error = DomainError;

    fn try_from(model: CommentWithAuthorModel) -> Result<Self, Self::Error> {
        let author = match (model.comment.user_id, model.author_username) {
            (Some(id), Some(username)) => Some(User {
                id: Snowflake::new(id),
                name: model.author_name,
                username,
                avatar: model.author_avatar,
                role: model.author_role.as_deref().map(Role::from_db).unwrap_or_default(),
                is_active: model.author_is_active.unwrap_or(true),
            }),
            _ => None,
        };

        Ok(CommentWithAuthor {
            comment: Comment::try_from(model.comment)?,
            author,
        })
    }
}

/// Borrowed column values for inserting a comment
pub struct CommentInsert<'a> {
    pub id: i64,
    pub photo_id: i64,
    pub parent_id: Option<i64>,
    pub user_id: Option<i64>,
    pub guest_name: Option<&'a str>,
    pub guest_token: Option<&'a str>,
    pub content: &'a str,
    pub image_url: Option<&'a str>,
    pub is_anonymous: bool,
}

impl<'a> CommentInsert<'a> {
    pub fn new(comment: &'a Comment) -> Self {
        let (user_id, guest_name, guest_token) = match &comment.author {
            CommentAuthor::Member { user_id } => (Some(user_id.into_inner()), None, None),
            CommentAuthor::Guest { name, token } => {
                (None, Some(name.as_str()), Some(token.as_str()))
            }
        };

        Self {
            id: comment.id.into_inner(),
            photo_id: comment.photo_id.into_inner(),
            parent_id: comment.parent_id.map(Snowflake::into_inner),
            user_id,
            guest_name,
            guest_token,
            content: &comment.content,
            image_url: comment.image_url.as_deref(),
            is_anonymous: comment.is_anonymous,
        }
    }
}
