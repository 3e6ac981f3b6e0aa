//! Route definitions
//!
//! Comment, reaction and vote routes are mounted under /api; health probes
//! live at the root as well.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{self, comments, health, reactions, votes};
use crate::state::AppState;

/// Create the main router: API routes, health probes, and the 404 fallback
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .merge(health_routes())
        .fallback(handlers::not_found)
}

/// Liveness and readiness probes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(comment_routes())
        .merge(reaction_routes())
        .merge(vote_routes())
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/photos/:photo_id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/photos/:photo_id/comments/:comment_id",
            patch(comments::update_comment).delete(comments::delete_comment),
        )
}

fn reaction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/comments/:comment_id/reactions",
            get(reactions::get_reactions).post(reactions::toggle_reaction),
        )
        .route("/comments/:comment_id/reactors", get(reactions::get_reactors))
}

fn vote_routes() -> Router<AppState> {
    Router::new()
        .route("/comments/votes/batch", post(votes::batch_votes))
        .route(
            "/comments/:comment_id/votes",
            get(votes::get_votes).post(votes::toggle_vote),
        )
}
