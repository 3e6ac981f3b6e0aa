//! Comment service
//!
//! Threaded listing, submission, editing and deletion of photo comments.

use std::collections::HashMap;

use gallery_core::entities::{normalize_content, normalize_guest_name, Comment};
use gallery_core::{DomainError, GuestToken, Requester, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};

use super::aggregates::{reaction_summaries, reaction_summary, vote_summaries, vote_summary};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All comments on a photo, threaded one level deep.
    ///
    /// Top-level comments come newest first; each one's replies oldest first.
    /// Aggregates for the whole page are fetched in a fixed number of queries.
    #[instrument(skip(self, requester))]
    pub async fn list(
        &self,
        photo_id: Snowflake,
        requester: &Requester,
    ) -> ServiceResult<Vec<CommentResponse>> {
        let rows = self.ctx.comment_repo().list_by_photo(photo_id).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Snowflake> = rows.iter().map(|row| row.comment.id).collect();
        let actor = requester.actor();
        let (mut reactions, mut votes) = tokio::try_join!(
            reaction_summaries(self.ctx, &ids, actor.as_ref()),
            vote_summaries(self.ctx, &ids, actor.as_ref()),
        )?;

        let mut top_level = Vec::new();
        let mut replies: HashMap<Snowflake, Vec<CommentResponse>> = HashMap::new();

        for row in rows {
            let id = row.comment.id;
            let view = CommentResponse::render(&row.comment, row.author.as_ref(), requester)
                .with_aggregates(
                    reactions.remove(&id).unwrap_or_default(),
                    votes.remove(&id).unwrap_or_default(),
                );

            match row.comment.parent_id {
                Some(parent_id) => replies.entry(parent_id).or_default().push(view),
                None => top_level.push(view),
            }
        }

        top_level.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        Ok(top_level
            .into_iter()
            .map(|view| {
                let mut thread = replies.remove(&view.id).unwrap_or_default();
                thread.sort_by_key(|reply| (reply.created_at, reply.id));
                view.with_replies(thread)
            })
            .collect())
    }

    /// Post a comment or a reply.
    ///
    /// Members post under their account (optionally anonymous); everyone
    /// else posts as a guest and receives a fresh guest token, returned only
    /// in this response.
    #[instrument(skip(self, request, requester))]
    pub async fn submit(
        &self,
        photo_id: Snowflake,
        request: CreateCommentRequest,
        requester: &Requester,
    ) -> ServiceResult<CommentResponse> {
        let content = normalize_content(request.content.as_deref())?;
        let id = self.ctx.generate_id();
        let now = self.ctx.now();

        let comment = match requester.user() {
            Some(user) => {
                Comment::by_member(id, photo_id, user.id, content, request.is_anonymous, now)
            }
            None => {
                let name = normalize_guest_name(request.guest_name.as_deref())?;
                Comment::by_guest(id, photo_id, name, GuestToken::generate(), content, now)
            }
        };

        if let Some(parent_id) = request.parent_id {
            let parent = self
                .ctx
                .comment_repo()
                .find_by_id(parent_id)
                .await?
                .filter(|parent| parent.belongs_to(photo_id))
                .ok_or(DomainError::ParentNotFound(parent_id))?;

            if parent.is_reply() {
                return Err(DomainError::ReplyToReply.into());
            }
        }

        let image_url = match request.image {
            Some(upload) => Some(self.ctx.image_store().store(upload).await?),
            None => None,
        };

        let comment = comment
            .with_parent(request.parent_id)
            .with_image(image_url);
        self.ctx.comment_repo().create(&comment).await?;

        info!(
            comment_id = %comment.id,
            photo_id = %photo_id,
            is_reply = comment.is_reply(),
            is_guest = comment.is_guest(),
            "Comment created"
        );

        let mut view = CommentResponse::render(&comment, requester.user(), requester).owned();
        view.guest_token = comment.guest_token().map(|t| t.as_str().to_string());
        Ok(view)
    }

    /// Edit a comment's body within the edit window.
    /// Checks existence, then ownership, then the window.
    #[instrument(skip(self, request, requester))]
    pub async fn update(
        &self,
        photo_id: Snowflake,
        comment_id: Snowflake,
        request: UpdateCommentRequest,
        requester: &Requester,
    ) -> ServiceResult<CommentResponse> {
        let content = normalize_content(request.content.as_deref())?;
        let mut comment = self.find_on_photo(photo_id, comment_id).await?;

        let guest_token = request.guest_token.as_deref().and_then(GuestToken::parse);
        if !comment.is_owned_by(requester, guest_token.as_ref()) {
            return Err(DomainError::NotCommentOwner { action: "edit" }.into());
        }

        let now = self.ctx.now();
        if !self.ctx.policy().can_edit(comment.created_at, now) {
            return Err(DomainError::EditWindowExpired.into());
        }

        comment.edit(content, now);
        self.ctx
            .comment_repo()
            .update_content(comment.id, &comment.content, now)
            .await?;

        info!(comment_id = %comment.id, "Comment updated");

        let actor = requester.actor();
        let (reactions, votes) = tokio::try_join!(
            reaction_summary(self.ctx, comment.id, actor.as_ref()),
            vote_summary(self.ctx, comment.id, actor.as_ref()),
        )?;

        // An owning member is the requester, so their profile is at hand
        Ok(CommentResponse::render(&comment, requester.user(), requester)
            .owned()
            .with_aggregates(reactions, votes))
    }

    /// Delete a comment with its replies, reactions and votes.
    ///
    /// Admins may delete anything at any time. Everyone else must own the
    /// comment and be within the delete window; ownership is checked first
    /// so strangers never learn a comment's age.
    #[instrument(skip(self, requester, guest_token))]
    pub async fn delete(
        &self,
        photo_id: Snowflake,
        comment_id: Snowflake,
        requester: &Requester,
        guest_token: Option<&str>,
    ) -> ServiceResult<()> {
        let comment = self.find_on_photo(photo_id, comment_id).await?;
        let by_admin = requester.is_admin();

        if !by_admin {
            let guest_token = guest_token.and_then(GuestToken::parse);
            if !comment.is_owned_by(requester, guest_token.as_ref()) {
                return Err(DomainError::NotCommentOwner { action: "delete" }.into());
            }
            if !self.ctx.policy().can_delete(comment.created_at, self.ctx.now()) {
                return Err(DomainError::DeleteWindowExpired.into());
            }
        }

        self.ctx.comment_repo().delete(comment.id).await?;

        info!(comment_id = %comment.id, by_admin, "Comment deleted");
        Ok(())
    }

    async fn find_on_photo(
        &self,
        photo_id: Snowflake,
        comment_id: Snowflake,
    ) -> ServiceResult<Comment> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .filter(|comment| comment.belongs_to(photo_id))
            .ok_or(DomainError::CommentNotFound(comment_id))?;
        Ok(comment)
    }
}
