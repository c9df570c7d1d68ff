//! Integration tests for the REST endpoints.
//!
//! Requests go through the fully assembled router (middleware included)
//! with `tower::ServiceExt::oneshot`; no socket is bound.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use codepair::adapters::http::{app_router, RouterConfig};
use codepair::adapters::memory::InMemoryRoomStore;
use codepair::adapters::websocket::{Broadcaster, ConnectionRegistry};
use codepair::domain::foundation::RoomId;
use codepair::ports::RoomStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app(store: Arc<InMemoryRoomStore>) -> Router {
    app_router(
        store,
        Broadcaster::new(Arc::new(ConnectionRegistry::new()), Duration::from_secs(1)),
        &RouterConfig {
            cors_origins: vec!["http://localhost:3000".to_string()],
            request_timeout: Duration::from_secs(5),
            outbound_buffer: 8,
        },
    )
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// =============================================================================
// Root
// =============================================================================

#[tokio::test]
async fn root_lists_endpoints() {
    let (status, body) = call(app(Arc::new(InMemoryRoomStore::new())), get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["websocket"], "/ws/{room_id}");
    assert!(body["version"].is_string());
}

// =============================================================================
// Rooms
// =============================================================================

#[tokio::test]
async fn create_room_with_language() {
    let store = Arc::new(InMemoryRoomStore::new());
    let (status, body) = call(
        app(store.clone()),
        post_json("/rooms", json!({ "language": "javascript" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let room_id: RoomId = body["roomId"].as_str().unwrap().parse().unwrap();
    assert_eq!(room_id.as_str().len(), 8);

    let room = store.get(&room_id).await.unwrap().unwrap();
    assert_eq!(room.language().as_str(), "javascript");
    assert_eq!(room.code(), "");
}

#[tokio::test]
async fn create_room_without_body_defaults_to_python() {
    let store = Arc::new(InMemoryRoomStore::new());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/rooms")
        .body(Body::empty())
        .unwrap();

    let (status, body) = call(app(store.clone()), request).await;

    assert_eq!(status, StatusCode::CREATED);
    let room_id: RoomId = body["roomId"].as_str().unwrap().parse().unwrap();
    let room = store.get(&room_id).await.unwrap().unwrap();
    assert_eq!(room.language().as_str(), "python");
}

#[tokio::test]
async fn create_room_rejects_blank_language() {
    let (status, body) = call(
        app(Arc::new(InMemoryRoomStore::new())),
        post_json("/rooms", json!({ "language": "  " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn get_room_returns_current_state() {
    let store = Arc::new(InMemoryRoomStore::new());
    let room = store.create(Default::default()).await.unwrap();
    store.update_code(room.id(), "print(1)").await.unwrap();

    let (status, body) = call(app(store), get(&format!("/rooms/{}", room.id()))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roomId"], room.id().as_str());
    assert_eq!(body["code"], "print(1)");
    assert_eq!(body["language"], "python");
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn get_unknown_room_is_404() {
    let (status, body) = call(
        app(Arc::new(InMemoryRoomStore::new())),
        get("/rooms/deadbeef"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Room not found: deadbeef");
}

#[tokio::test]
async fn get_malformed_room_id_is_400() {
    let (status, body) = call(
        app(Arc::new(InMemoryRoomStore::new())),
        get("/rooms/bad%20id"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

// =============================================================================
// Autocomplete
// =============================================================================

#[tokio::test]
async fn autocomplete_returns_at_most_three_suggestions() {
    let code = "import ";
    let (status, body) = call(
        app(Arc::new(InMemoryRoomStore::new())),
        post_json(
            "/autocomplete",
            json!({ "code": code, "cursorPosition": code.len(), "language": "python" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["suggestions"],
        json!(["numpy as np", "pandas as pd", "matplotlib.pyplot as plt"])
    );
}

#[tokio::test]
async fn autocomplete_uses_line_under_cursor() {
    let code = "System.out.\nint x = 0;";
    let (status, body) = call(
        app(Arc::new(InMemoryRoomStore::new())),
        post_json(
            "/autocomplete",
            json!({ "code": code, "cursorPosition": 11, "language": "java" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"], json!(["println()", "print()"]));
}

#[tokio::test]
async fn autocomplete_unknown_language_is_empty() {
    let (status, body) = call(
        app(Arc::new(InMemoryRoomStore::new())),
        post_json(
            "/autocomplete",
            json!({ "code": "import ", "cursorPosition": 7, "language": "rust" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"], json!([]));
}

#[tokio::test]
async fn autocomplete_missing_fields_is_rejected() {
    let (status, _body) = call(
        app(Arc::new(InMemoryRoomStore::new())),
        post_json("/autocomplete", json!({ "code": "x" })),
    )
    .await;

    assert!(status.is_client_error());
}
