use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::{Value, json};

use idsync_testing::{db::memory_db, fixture::Fixture};
use idsync_webhooks::router::build_router;
use idsync_webhooks::state::AppState;
use idsync_webhooks_schema::{accounts, sessions, users};

use crate::helpers::minimal_user_created;

const CLERK_HOOK: &str = "/webhooks/clerk";

async fn server() -> (TestServer, DatabaseConnection) {
    let db = memory_db().await;
    let server = TestServer::new(build_router(AppState { db: db.clone() })).unwrap();
    (server, db)
}

async fn row_counts(db: &DatabaseConnection) -> (u64, u64, u64) {
    (
        users::Entity::find().count(db).await.unwrap(),
        sessions::Entity::find().count(db).await.unwrap(),
        accounts::Entity::find().count(db).await.unwrap(),
    )
}

async fn post(server: &TestServer, payload: &Value) -> (StatusCode, Value) {
    let resp = server.post(CLERK_HOOK).json(payload).await;
    (resp.status_code(), resp.json::<Value>())
}

// ── liveness ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_liveness_on_root() {
    let (server, _db) = server().await;
    let resp = server.get("/").await;
    resp.assert_status_ok();
    resp.assert_json(&json!({ "message": "webhook receiver is running" }));
}

#[tokio::test]
async fn should_report_ready_when_store_answers() {
    let (server, _db) = server().await;
    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_attach_request_id() {
    let (server, _db) = server().await;
    let resp = server.get("/").await;
    assert!(resp.headers().contains_key("x-request-id"));
}

// ── user.created ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_user_from_minimal_payload() {
    let (server, db) = server().await;

    let (status, body) = post(&server, &minimal_user_created()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "user created", "clerk_id": "u1" }));
    let user = users::Entity::find()
        .filter(users::Column::ClerkId.eq("u1"))
        .one(&db)
        .await
        .unwrap()
        .expect("user row");
    assert_eq!(user.email, "a@b.com");
    assert!(user.email_verified);
    assert_eq!(
        user.created_at.map(|t| t.timestamp_millis()),
        Some(1_700_000_000_000)
    );
    assert_eq!(user.updated_at, None);
}

#[tokio::test]
async fn should_fail_on_duplicate_user() {
    let (server, db) = server().await;
    post(&server, &minimal_user_created()).await;

    let (status, body) = post(&server, &minimal_user_created()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("create user"));
    assert_eq!(row_counts(&db).await, (1, 0, 0));
}

#[tokio::test]
async fn should_fail_on_missing_key() {
    let (server, db) = server().await;

    let (status, body) = post(
        &server,
        &json!({
            "type": "user.created",
            "data": { "email_addresses": [{ "email_address": "a@b.com" }] }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("missing field `id`"));
    assert_eq!(row_counts(&db).await, (0, 0, 0));
}

#[tokio::test]
async fn should_fail_on_non_json_body() {
    let (server, _db) = server().await;

    let resp = server.post(CLERK_HOOK).text("definitely not json").await;

    assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.json::<Value>()["error"].is_string());
}

// ── full lifecycle ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sync_user_and_session_lifecycle() {
    let (server, db) = server().await;

    let (status, _) = post(&server, &Fixture::clerk("user_created")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_counts(&db).await, (1, 0, 1));

    let (status, body) = post(&server, &Fixture::clerk("session_created")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "session created", "session_id": "sess_2Xq1bZ5DZrKjvjzxHVbRM7jxLJ8" })
    );

    let user = users::Entity::find()
        .filter(users::Column::ClerkId.eq("user_29w83sxmDNGwOuEthce5gg56FcC"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let session = sessions::Entity::find_by_id("sess_2Xq1bZ5DZrKjvjzxHVbRM7jxLJ8")
        .one(&db)
        .await
        .unwrap()
        .expect("session row");
    assert_eq!(session.user_id, user.id);
    assert_eq!(session.ip_address.as_deref(), Some("192.168.1.100"));

    let (status, body) = post(&server, &Fixture::clerk("user_deleted")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "user deleted", "clerk_id": "user_29w83sxmDNGwOuEthce5gg56FcC" })
    );
    assert_eq!(row_counts(&db).await, (0, 0, 0));
}

#[tokio::test]
async fn should_treat_deleting_unknown_user_as_success() {
    let (server, db) = server().await;
    post(&server, &minimal_user_created()).await;

    let (status, body) = post(&server, &Fixture::clerk("user_deleted")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "user deleted");
    assert_eq!(row_counts(&db).await, (1, 0, 0));
}

// ── sessions ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_skip_session_for_unknown_user() {
    let (server, db) = server().await;

    let (status, body) = post(&server, &Fixture::clerk("session_created")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "session created");
    assert_eq!(row_counts(&db).await, (0, 0, 0));
}

#[tokio::test]
async fn should_end_session_idempotently() {
    let (server, db) = server().await;
    post(&server, &Fixture::clerk("user_created")).await;
    post(&server, &Fixture::clerk("session_created")).await;
    assert_eq!(row_counts(&db).await.1, 1);

    for _ in 0..2 {
        let (status, body) = post(&server, &Fixture::clerk("session_removed")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "status": "session ended", "session_id": "sess_2Xq1bZ5DZrKjvjzxHVbRM7jxLJ8" })
        );
    }
    assert_eq!(row_counts(&db).await, (1, 0, 1));
}

// ── ignored / routing ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_ignore_unknown_event_types() {
    let (server, db) = server().await;
    post(&server, &Fixture::clerk("user_created")).await;

    for payload in [
        json!({ "type": "user.updated", "data": { "id": "user_29w83sxmDNGwOuEthce5gg56FcC" } }),
        json!({ "data": { "id": "x" } }),
        json!({}),
    ] {
        let (status, body) = post(&server, &payload).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ignored" }));
    }
    assert_eq!(row_counts(&db).await, (1, 0, 1));
}

#[tokio::test]
async fn should_reject_unknown_provider() {
    let (server, _db) = server().await;

    let resp = server
        .post("/webhooks/stripe")
        .json(&minimal_user_created())
        .await;

    assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.json::<Value>(),
        json!({ "error": "unknown webhook provider: stripe" })
    );
}
