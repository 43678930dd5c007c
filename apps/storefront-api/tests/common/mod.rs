//! Shared helpers for API integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use storefront_api::{build_router, ApiConfig, AppState};
use storefront_db::{Database, DbConfig};

pub async fn test_state() -> AppState {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    AppState::new(db, ApiConfig::default())
}

pub async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    (build_router(state.clone()), state)
}

/// Sends one request through the router; returns status and parsed JSON body
/// (`Value::Null` for an empty body).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// Creates a manager and returns its id.
pub async fn create_manager(app: &Router, email: &str) -> i64 {
    let (status, body) = post(
        app,
        "/api/v1/user/create",
        serde_json::json!({ "email": email, "role": "manager" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

/// Creates a store under a fresh manager and returns the store id.
pub async fn create_store(app: &Router, manager: i64) -> String {
    let (status, body) = post(
        app,
        "/api/v1/store/create",
        serde_json::json!({ "name": "Corner Shop", "locations": "Main St 1", "manager": manager }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

pub async fn create_category(app: &Router, name: &str) -> i64 {
    let (status, body) = post(
        app,
        "/api/v1/category/create",
        serde_json::json!({ "name": name, "description": format!("All things {name}") }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}
