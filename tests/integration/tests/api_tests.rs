//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::collections::HashMap;

use integration_tests::{
    age_comment, assert_error, assert_json, assert_status, check_test_env, comment_path,
    comments_path, fixtures::*, seed_photo, TestServer,
};
use reqwest::{multipart, StatusCode};
use serde_json::json;

const HEART: &str = "🤍";

async fn post_guest_comment(server: &TestServer, photo: gallery_core::Snowflake) -> CommentView {
    let response = server
        .post(&comments_path(photo), &CreateCommentRequest::guest("Visitor", "hello"))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    for path in ["/health", "/api/health"] {
        let response = server.get(path).await.expect("Request failed");
        let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(body["status"], "ok");
    }
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_list_empty_photo() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();

    let response = server.get(&comments_path(photo)).await.unwrap();
    let comments: Vec<CommentView> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(comments.is_empty());
}

#[tokio::test]
async fn test_member_comment_and_reply_thread() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();
    let user = TestUser::member(&server).await.unwrap();

    let response = server
        .post_auth(&comments_path(photo), &user.token, &CreateCommentRequest::member("  first  "))
        .await
        .unwrap();
    let parent: CommentView = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(parent.content, "first");
    assert_eq!(parent.author_name, user.name);
    assert!(parent.is_owner);
    assert!(!parent.is_guest);
    assert!(parent.guest_token.is_none());

    let reply = CreateCommentRequest::guest("Visitor", "a reply").reply_to(&parent.id);
    let response = server.post(&comments_path(photo), &reply).await.unwrap();
    let reply: CommentView = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(reply.parent_id.as_deref(), Some(parent.id.as_str()));

    let response = server.get(&comments_path(photo)).await.unwrap();
    let comments: Vec<CommentView> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments.len(), 1);
    let replies = comments[0].replies.as_ref().unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].author_name, "Visitor");
    assert!(replies[0].is_guest);
    assert!(!comments[0].is_owner);
}

#[tokio::test]
async fn test_reply_to_reply_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();
    let parent = post_guest_comment(&server, photo).await;

    let reply = CreateCommentRequest::guest("B", "reply").reply_to(&parent.id);
    let response = server.post(&comments_path(photo), &reply).await.unwrap();
    let reply: CommentView = assert_json(response, StatusCode::CREATED).await.unwrap();

    let nested = CreateCommentRequest::guest("C", "nested").reply_to(&reply.id);
    let response = server.post(&comments_path(photo), &nested).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "REPLY_TO_REPLY");
}

#[tokio::test]
async fn test_comment_validation_errors() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();
    let path = comments_path(photo);

    let response = server
        .post(&path, &CreateCommentRequest::guest("Visitor", "   "))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.post(&path, &CreateCommentRequest::member("no name")).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "GUEST_NAME_REQUIRED");

    let missing = seed_photo(&server.pool).await.unwrap();
    sqlx::query("DELETE FROM photos WHERE id = $1")
        .bind(missing.into_inner())
        .execute(&server.pool)
        .await
        .unwrap();
    let response = server
        .post(&comments_path(missing), &CreateCommentRequest::guest("V", "hi"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_PHOTO");
}

#[tokio::test]
async fn test_anonymous_comment_reveals_author_only_to_admins() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();
    let user = TestUser::member(&server).await.unwrap();
    let admin = TestUser::admin(&server).await.unwrap();

    let request = CreateCommentRequest {
        is_anonymous: true,
        ..CreateCommentRequest::member("secret")
    };
    let response = server.post_auth(&comments_path(photo), &user.token, &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get(&comments_path(photo)).await.unwrap();
    let public: Vec<CommentView> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(public[0].author_name, "Anonymous");
    assert!(public[0].real_author.is_none());

    let response = server.get_auth(&comments_path(photo), &admin.token).await.unwrap();
    let moderated: Vec<CommentView> = assert_json(response, StatusCode::OK).await.unwrap();
    let real = moderated[0].real_author.as_ref().unwrap();
    assert_eq!(real.username, user.username);
}

#[tokio::test]
async fn test_guest_token_grants_ownership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();
    let created = post_guest_comment(&server, photo).await;
    let token = created.guest_token.clone().expect("creator receives guest token");
    assert!(created.is_owner);

    let response = server.get(&comments_path(photo)).await.unwrap();
    let listed: Vec<CommentView> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listed[0].guest_token.is_none());
    assert!(!listed[0].is_owner);

    let path = format!("{}?guestToken={}", comments_path(photo), token);
    let response = server.get(&path).await.unwrap();
    let listed: Vec<CommentView> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listed[0].is_owner);

    let stranger = GuestTokenBody {
        content: Some("hijack".to_string()),
        guest_token: Some("not-the-token".to_string()),
    };
    let response = server.patch(&comment_path(photo, &created.id), &stranger).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_COMMENT_OWNER");

    let edit = GuestTokenBody {
        content: Some("edited".to_string()),
        guest_token: Some(token.clone()),
    };
    let response = server.patch(&comment_path(photo, &created.id), &edit).await.unwrap();
    let edited: CommentView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.content, "edited");
    assert!(edited.updated_at.is_some());

    let delete = GuestTokenBody {
        content: None,
        guest_token: Some(token),
    };
    let response = server.delete(&comment_path(photo, &created.id), &delete).await.unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Comment deleted successfully");

    let response = server.get(&comments_path(photo)).await.unwrap();
    let listed: Vec<CommentView> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_edit_window_expires() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();
    let user = TestUser::member(&server).await.unwrap();

    let response = server
        .post_auth(&comments_path(photo), &user.token, &CreateCommentRequest::member("v1"))
        .await
        .unwrap();
    let created: CommentView = assert_json(response, StatusCode::CREATED).await.unwrap();
    age_comment(&server.pool, &created.id, 10).await.unwrap();

    let response = server
        .patch_auth(&comment_path(photo, &created.id), &user.token, &json!({ "content": "v2" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "EDIT_WINDOW_EXPIRED");

    // Still inside the delete window
    let response = server
        .delete_auth(&comment_path(photo, &created.id), &user.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_admin_deletes_any_comment_with_replies() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();
    let admin = TestUser::admin(&server).await.unwrap();
    let parent = post_guest_comment(&server, photo).await;

    let reply = CreateCommentRequest::guest("B", "reply").reply_to(&parent.id);
    let response = server.post(&comments_path(photo), &reply).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    age_comment(&server.pool, &parent.id, 60 * 24 * 30).await.unwrap();

    let response = server
        .delete_auth(&comment_path(photo, &parent.id), &admin.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let (remaining,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM photo_comments WHERE photo_id = $1")
            .bind(photo.into_inner())
            .fetch_one(&server.pool)
            .await
            .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn test_comment_on_other_photo_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();
    let other = seed_photo(&server.pool).await.unwrap();
    let user = TestUser::admin(&server).await.unwrap();
    let created = post_guest_comment(&server, photo).await;

    let response = server
        .delete_auth(&comment_path(other, &created.id), &user.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_COMMENT");
}

#[tokio::test]
async fn test_multipart_comment_with_image() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();
    let user = TestUser::member(&server).await.unwrap();

    let image = multipart::Part::bytes(b"\x89PNG fake".to_vec())
        .file_name("shot.png")
        .mime_str("image/png")
        .unwrap();
    let form = multipart::Form::new()
        .text("content", "with picture")
        .part("image", image);

    let response = server
        .post_form(&comments_path(photo), Some(&user.token), form)
        .await
        .unwrap();
    let created: CommentView = assert_json(response, StatusCode::CREATED).await.unwrap();
    let image_url = created.image_url.expect("image url");
    assert!(image_url.starts_with("/uploads/comments/comment-"));

    let response = server.get(&image_url).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"\x89PNG fake");
}

#[tokio::test]
async fn test_multipart_rejects_gif() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();

    let image = multipart::Part::bytes(b"GIF89a".to_vec())
        .file_name("anim.gif")
        .mime_str("image/gif")
        .unwrap();
    let form = multipart::Form::new()
        .text("content", "moving")
        .text("guestName", "Visitor")
        .part("image", image);

    let response = server.post_form(&comments_path(photo), None, form).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["message"], "Only JPG and PNG images are allowed");
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_toggle_cycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();
    let user = TestUser::member(&server).await.unwrap();
    let comment = post_guest_comment(&server, photo).await;
    let path = format!("/api/comments/{}/reactions", comment.id);
    let body = ToggleReactionRequest { emoji: HEART.to_string() };

    let response = server.post_auth(&path, &user.token, &body).await.unwrap();
    let toggled: ReactionToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggled.action, "added");
    assert_eq!(toggled.reactions[HEART], ReactionState { count: 1, has_reacted: true });

    let response = server.get(&path).await.unwrap();
    let anonymous: HashMap<String, ReactionState> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(anonymous[HEART], ReactionState { count: 1, has_reacted: false });

    let reactors_path = format!("/api/comments/{}/reactors?emoji={}", comment.id, HEART);
    let response = server.get(&reactors_path).await.unwrap();
    let reactors: Vec<Reactor> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(reactors.len(), 1);
    assert_eq!(reactors[0].name, user.name);
    assert!(!reactors[0].is_guest);

    let response = server.post_auth(&path, &user.token, &body).await.unwrap();
    let toggled: ReactionToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggled.action, "removed");
    assert!(toggled.reactions.is_empty());
}

#[tokio::test]
async fn test_reaction_rules() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();
    let user = TestUser::member(&server).await.unwrap();
    let comment = post_guest_comment(&server, photo).await;
    let path = format!("/api/comments/{}/reactions", comment.id);

    let response = server
        .post(&path, &ToggleReactionRequest { emoji: HEART.to_string() })
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "AUTHENTICATION_REQUIRED");

    let response = server
        .post_auth(&path, &user.token, &ToggleReactionRequest { emoji: "🚀".to_string() })
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_REACTION");

    let reactors_path = format!("/api/comments/{}/reactors", comment.id);
    let response = server.get(&reactors_path).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Vote Tests
// ============================================================================

#[tokio::test]
async fn test_vote_toggle_cycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();
    let user = TestUser::member(&server).await.unwrap();
    let comment = post_guest_comment(&server, photo).await;
    let path = format!("/api/comments/{}/votes", comment.id);
    let like = ToggleVoteRequest { vote_type: "like".to_string() };
    let dislike = ToggleVoteRequest { vote_type: "dislike".to_string() };

    let response = server.post_auth(&path, &user.token, &like).await.unwrap();
    let toggled: VoteToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggled.action, "added");
    assert_eq!(toggled.votes.likes, 1);
    assert_eq!(toggled.votes.user_vote.as_deref(), Some("like"));

    let response = server.post_auth(&path, &user.token, &dislike).await.unwrap();
    let toggled: VoteToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggled.action, "switched");
    assert_eq!(
        toggled.votes,
        VoteSummary { likes: 0, dislikes: 1, user_vote: Some("dislike".to_string()) }
    );

    let response = server.post_auth(&path, &user.token, &dislike).await.unwrap();
    let toggled: VoteToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggled.action, "removed");
    assert_eq!(toggled.votes, VoteSummary { likes: 0, dislikes: 0, user_vote: None });

    let response = server
        .post_auth(&path, &user.token, &ToggleVoteRequest { vote_type: "meh".to_string() })
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_VOTE_TYPE");

    let response = server.post(&path, &like).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_vote_on_missing_comment() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let user = TestUser::member(&server).await.unwrap();
    let path = format!("/api/comments/{}/votes", unique_id());

    let response = server
        .post_auth(&path, &user.token, &ToggleVoteRequest { vote_type: "like".to_string() })
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_COMMENT");
}

#[tokio::test]
async fn test_batch_votes() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();
    let user = TestUser::member(&server).await.unwrap();
    let voted = post_guest_comment(&server, photo).await;
    let quiet = post_guest_comment(&server, photo).await;

    let response = server
        .post_auth(
            &format!("/api/comments/{}/votes", voted.id),
            &user.token,
            &ToggleVoteRequest { vote_type: "like".to_string() },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let request = BatchVotesRequest {
        comment_ids: vec![voted.id.clone(), quiet.id.clone(), voted.id.clone()],
    };
    let response = server
        .post_auth("/api/comments/votes/batch", &user.token, &request)
        .await
        .unwrap();
    let batch: HashMap<String, VoteSummary> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[&voted.id].likes, 1);
    assert_eq!(batch[&voted.id].user_vote.as_deref(), Some("like"));
    assert_eq!(batch[&quiet.id], VoteSummary { likes: 0, dislikes: 0, user_vote: None });

    let response = server
        .post("/api/comments/votes/batch", &BatchVotesRequest { comment_ids: Vec::new() })
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["message"], "commentIds array is required");
}

#[tokio::test]
async fn test_deleting_comment_removes_aggregates() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let photo = seed_photo(&server.pool).await.unwrap();
    let user = TestUser::member(&server).await.unwrap();
    let admin = TestUser::admin(&server).await.unwrap();
    let comment = post_guest_comment(&server, photo).await;

    let response = server
        .post_auth(
            &format!("/api/comments/{}/reactions", comment.id),
            &user.token,
            &ToggleReactionRequest { emoji: HEART.to_string() },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .delete_auth(&comment_path(photo, &comment.id), &admin.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let id: i64 = comment.id.parse().unwrap();
    let (reactions,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM comment_reactions WHERE comment_id = $1")
            .bind(id)
            .fetch_one(&server.pool)
            .await
            .unwrap();
    assert_eq!(reactions, 0);
}
