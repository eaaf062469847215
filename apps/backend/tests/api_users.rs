//! User progress and item API tests.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{answer_with, select_language, TestContext};

/// Test progress for an unknown user.
#[tokio::test]
async fn test_progress_unknown_user() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/users/42/progress").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
}

/// Test progress totals and the rendered marks.
#[tokio::test]
async fn test_progress_after_answers() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let prompt = select_language(&server, 1, "spanish").await["reply"].clone();
    let body = answer_with(&server, 1, &prompt, "perro").await;
    answer_with(&server, 1, &body["reply"], "perro").await;

    let response = server.get("/api/users/1/progress").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["user_id"], 1);
    assert_eq!(body["language"], "spanish");
    assert_eq!(body["total"], 2);
    assert_eq!(body["correct"], 1);
    assert_eq!(body["recent"], json!(["pass", "fail"]));
    assert_eq!(body["rendered"], "✅❌");
    assert_eq!(
        body["session"],
        json!({ "phase": "awaiting_answer", "item_id": 3, "language": "spanish" })
    );
}

/// Test the session returns to idle when nothing can be prompted.
#[tokio::test]
async fn test_progress_idle_session() {
    let ctx = TestContext::new();
    let server = ctx.server();
    select_language(&server, 1, "german").await;

    let body: Value = server.get("/api/users/1/progress").await.json();

    assert_eq!(body["language"], "german");
    assert_eq!(body["session"], json!({ "phase": "idle" }));
}

/// Test viewing an item before and after it is scheduled.
#[tokio::test]
async fn test_view_item_schedule() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let prompt = select_language(&server, 1, "spanish").await["reply"].clone();

    let body: Value = server.get("/api/users/1/items/1").await.json();
    assert_eq!(body["items"][0]["target"], "perro");
    assert_eq!(body["items"][0]["schedule"], json!({ "status": "unscheduled" }));

    answer_with(&server, 1, &prompt, "perro").await;

    let body: Value = server.get("/api/users/1/items/1").await.json();
    let schedule = &body["items"][0]["schedule"];
    assert_eq!(schedule["status"], "scheduled");
    assert_eq!(schedule["interval_ms"], 216_000_000);
}

/// Test item lookups for unknown users and items.
#[tokio::test]
async fn test_view_item_not_found() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .get("/api/users/1/items/1")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    select_language(&server, 1, "spanish").await;

    server
        .get("/api/users/1/items/99")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// Test users are isolated from each other.
#[tokio::test]
async fn test_users_are_isolated() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let prompt = select_language(&server, 1, "spanish").await["reply"].clone();
    answer_with(&server, 1, &prompt, "perro").await;

    let body = select_language(&server, 2, "spanish").await;
    assert_eq!(body["reply"]["item_id"], 1);
    assert_eq!(body["reply"]["progress"], json!([]));

    let body: Value = server.get("/api/users/2/items/1").await.json();
    assert_eq!(body["items"][0]["schedule"]["status"], "unscheduled");
}
