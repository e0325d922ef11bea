//! HTTP-level integration tests for discussion and comment creation.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, post_raw};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Discussions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_discussion_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/discussions/",
        serde_json::json!({"user": "new user", "title": "New Discussion"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "New Discussion");
    assert_eq!(json["user"], "new user");
    assert!(json["id"].is_number());
    assert!(json["created_at"].is_string());

    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_discussion_trims_input(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/discussions/",
        serde_json::json!({"user": "  spaced  ", "title": " Title "}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user"], "spaced");
    assert_eq!(json["title"], "Title");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_discussion_empty_user_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/discussions/",
        serde_json::json!({"user": "", "title": "New Discussion"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["user"].is_array());
    assert!(json["fields"].get("title").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_discussion_missing_fields_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/discussions/", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["user"][0], "this field is required");
    assert_eq!(json["fields"]["title"][0], "this field is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_discussion_null_user_returns_field_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/discussions/",
        serde_json::json!({"user": null, "title": "x"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["user"][0], "may not be null");
    assert!(json["fields"].get("title").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_discussion_wrong_typed_fields_return_field_errors(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/discussions/",
        serde_json::json!({"user": true, "title": ["a", "b"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["user"][0], "must be a string");
    assert_eq!(json["fields"]["title"][0], "must be a string");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_discussion_numeric_user_is_taken_as_text(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/discussions/",
        serde_json::json!({"user": 42, "title": "Numbers"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user"], "42");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_discussion_title_too_long_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/discussions/",
        serde_json::json!({"user": "u", "title": "x".repeat(281)}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["title"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_discussion_malformed_json_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_raw(app, "/discussions/", "{not json".to_string()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_discussions_newest_first(pool: PgPool) {
    let first = common::create_discussion(&pool, "First").await;
    let second = common::create_discussion(&pool, "Second").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/discussions/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(common::ids(&json), vec![second, first]);
    assert_eq!(json[0]["title"], "Second");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_discussion_by_id(pool: PgPool) {
    let id = common::create_discussion(&pool, "Get Me").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/discussions/{id}/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["title"], "Get Me");
    assert_eq!(json["user"], "test_user");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_discussion_malformed_id_returns_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/discussions/abc/").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_discussion_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/discussions/999999/").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Comment creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_comment_returns_201(pool: PgPool) {
    let discussion_id = common::create_discussion(&pool, "Thread").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/discussions/{discussion_id}/comments/"),
        serde_json::json!({"user": "new commenter", "content": "New comment"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user"], "new commenter");
    assert_eq!(json["content"], "New comment");
    assert_eq!(json["discussion"], discussion_id);
    assert!(json["parent"].is_null());
    assert!(json["created_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_reply_sets_parent(pool: PgPool) {
    let discussion_id = common::create_discussion(&pool, "Thread").await;
    let parent = common::create_comment(&pool, discussion_id, "Top", None).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/discussions/{discussion_id}/comments/"),
        serde_json::json!({"user": "replier", "content": "New reply", "parent": parent}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["parent"], parent);
    assert_eq!(json["discussion"], discussion_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_discussion_in_body_is_ignored(pool: PgPool) {
    let target = common::create_discussion(&pool, "Target").await;
    let other = common::create_discussion(&pool, "Other").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/discussions/{target}/comments/"),
        serde_json::json!({"user": "u", "content": "c", "discussion": other}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["discussion"], target);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_comment_empty_user_returns_400(pool: PgPool) {
    let discussion_id = common::create_discussion(&pool, "Thread").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/discussions/{discussion_id}/comments/"),
        serde_json::json!({"user": "", "content": "New comment"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["user"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_comment_blank_content_returns_400(pool: PgPool) {
    let discussion_id = common::create_discussion(&pool, "Thread").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/discussions/{discussion_id}/comments/"),
        serde_json::json!({"user": "u", "content": "   "}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["content"][0], "may not be blank");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_comment_null_content_returns_field_error(pool: PgPool) {
    let discussion_id = common::create_discussion(&pool, "Thread").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/discussions/{discussion_id}/comments/"),
        serde_json::json!({"user": "u", "content": null}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["content"][0], "may not be null");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_comment_malformed_discussion_id_returns_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/discussions/abc/comments/",
        serde_json::json!({"user": "u", "content": "c"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_comment_with_foreign_parent_returns_400(pool: PgPool) {
    let a = common::create_discussion(&pool, "A").await;
    let b = common::create_discussion(&pool, "B").await;
    let in_a = common::create_comment(&pool, a, "in A", None).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/discussions/{b}/comments/"),
        serde_json::json!({"user": "u", "content": "cross", "parent": in_a}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["parent"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_comment_with_missing_parent_returns_400(pool: PgPool) {
    let discussion_id = common::create_discussion(&pool, "Thread").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/discussions/{discussion_id}/comments/"),
        serde_json::json!({"user": "u", "content": "c", "parent": 999999}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["parent"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_comment_in_missing_discussion_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/discussions/999999/comments/",
        serde_json::json!({"user": "u", "content": "c"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
