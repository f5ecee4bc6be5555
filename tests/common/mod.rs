#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use bookall_relay::config::ProviderConfig;
use bookall_relay::provider::BookSearchClient;
use bookall_relay::storage::JobStore;
use bookall_relay::{AppState, create_router};
use std::time::Duration;
use tower::ServiceExt;

pub const BOOK_PATH: &str = "/v1/search/book.json";

/// Router whose provider points at `base_url`
pub fn test_app(base_url: &str) -> Router {
    test_app_with_delay(base_url, Duration::ZERO)
}

pub fn test_app_with_delay(base_url: &str, keyword_delay: Duration) -> Router {
    let config = ProviderConfig {
        base_url: base_url.to_string(),
        client_id: "test-id".to_string(),
        client_secret: "test-secret".to_string(),
        display: 5,
    };
    create_router(AppState {
        books: BookSearchClient::new(&config),
        jobs: JobStore::new(),
        keyword_delay,
    })
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

pub async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    payload: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}
