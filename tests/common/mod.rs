#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use library_catalog::api::{AppState, create_router};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

/// テスト用のルーターを作成
///
/// 状態はテストごとに新しく作るため、テスト間で干渉しない。
pub fn create_test_app() -> axum::Router {
    create_router(Arc::new(AppState::default()))
}

/// リクエストを送り、ステータスとJSONボディを返す
///
/// ボディが空またはJSONでない場合は`Value::Null`になる。
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

/// JSONとして送るとは限らない生のボディでPOSTする
pub async fn send_raw(
    app: &axum::Router,
    uri: &str,
    content_type: &str,
    body: &'static str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

/// セッションを開始し、そのIDを返す
pub async fn open_session(app: &axum::Router) -> String {
    let (status, body) = send(app, "POST", "/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_string()
}

pub async fn add_book(
    app: &axum::Router,
    session: &str,
    book_id: &str,
    title: &str,
    author: &str,
) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        &format!("/sessions/{session}/books"),
        Some(json!({ "book_id": book_id, "title": title, "author": author })),
    )
    .await
}

pub async fn register_member(
    app: &axum::Router,
    session: &str,
    member_id: &str,
    name: &str,
) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        &format!("/sessions/{session}/members"),
        Some(json!({ "member_id": member_id, "name": name })),
    )
    .await
}

pub async fn issue_book(
    app: &axum::Router,
    session: &str,
    book_id: &str,
    member_id: &str,
) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        &format!("/sessions/{session}/issues"),
        Some(json!({ "book_id": book_id, "member_id": member_id })),
    )
    .await
}

pub async fn return_book(
    app: &axum::Router,
    session: &str,
    book_id: &str,
    member_id: &str,
) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        &format!("/sessions/{session}/returns"),
        Some(json!({ "book_id": book_id, "member_id": member_id })),
    )
    .await
}
