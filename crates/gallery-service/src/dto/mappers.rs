//! Entity to DTO mappers
//!
//! The comment mapper applies the visibility rules: guest names, the
//! "Anonymous" mask, and the admin-only `realAuthor` field.

use gallery_core::entities::{Comment, CommentAuthor, ReactionCount, Reactor, User, VoteTally};
use gallery_core::{Requester, VoteType};

use super::responses::{
    CommentResponse, RealAuthor, ReactionState, ReactionSummary, ReactorResponse, VoteSummary,
};

const ANONYMOUS: &str = "Anonymous";
const UNKNOWN_AUTHOR: &str = "Unknown";

// ============================================================================
// Comment Mappers
// ============================================================================

impl CommentResponse {
    /// Render a comment for `viewer`. `author` is the member profile behind
    /// the comment, if it has one. Aggregates start empty.
    pub fn render(comment: &Comment, author: Option<&User>, viewer: &Requester) -> Self {
        let (author_name, author_avatar, real_author) = match &comment.author {
            CommentAuthor::Guest { .. } => (
                comment.guest_name().unwrap_or("Guest").to_string(),
                None,
                None,
            ),
            CommentAuthor::Member { .. } if comment.is_anonymous => {
                let real_author = author.filter(|_| viewer.is_admin()).map(|user| RealAuthor {
                    id: user.id,
                    name: user.name.clone(),
                    username: user.username.clone(),
                });
                (ANONYMOUS.to_string(), None, real_author)
            }
            CommentAuthor::Member { .. } => (
                author.map_or(UNKNOWN_AUTHOR, User::display_name).to_string(),
                author.and_then(|user| user.avatar.clone()),
                None,
            ),
        };

        Self {
            id: comment.id,
            photo_id: comment.photo_id,
            parent_id: comment.parent_id,
            author_name,
            author_avatar,
            content: comment.content.clone(),
            image_url: comment.image_url.clone(),
            is_anonymous: comment.is_anonymous,
            is_guest: comment.is_guest(),
            is_owner: comment.is_owned_by(viewer, None),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            real_author,
            guest_token: None,
            replies: None,
            reactions: ReactionSummary::default(),
            votes: VoteSummary::default(),
        }
    }

    pub fn with_aggregates(mut self, reactions: ReactionSummary, votes: VoteSummary) -> Self {
        self.reactions = reactions;
        self.votes = votes;
        self
    }

    pub fn with_replies(mut self, replies: Vec<CommentResponse>) -> Self {
        self.replies = Some(replies);
        self
    }

    /// Mark the viewer as the verified owner
    pub fn owned(mut self) -> Self {
        self.is_owner = true;
        self
    }
}

// ============================================================================
// Aggregate Mappers
// ============================================================================

impl ReactionSummary {
    /// Combine per-emoji counts with the emoji the viewer has placed
    pub fn from_counts(counts: Vec<ReactionCount>, own: &[String]) -> Self {
        let mut summary = Self::default();
        for ReactionCount { emoji, count } in counts {
            if count <= 0 {
                continue;
            }
            let has_reacted = own.iter().any(|e| *e == emoji);
            summary.push(emoji, ReactionState { count, has_reacted });
        }
        summary
    }
}

impl VoteSummary {
    pub fn new(tally: VoteTally, user_vote: Option<VoteType>) -> Self {
        Self {
            likes: tally.likes,
            dislikes: tally.dislikes,
            user_vote,
        }
    }
}

impl From<Reactor> for ReactorResponse {
    fn from(reactor: Reactor) -> Self {
        Self {
            name: reactor.display_name,
            is_guest: reactor.is_guest,
        }
    }
}
