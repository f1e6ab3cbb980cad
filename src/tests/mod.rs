//! In-crate tests.
//!
//! - **api_tests**: CRUD behaviour of every resource through the router
//! - **health_api_tests**: liveness, readiness, version and counter endpoints
//! - **config_tests**: configuration defaults, layering and validation
//! - **db_tests**: schema migration
//! - **error_tests**: error rendering and conversions
//! - **repository_tests**: SQLite and in-memory repositories
//!
//! Run with `cargo test`, or a single module with e.g. `cargo test api_tests`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::state::AppState;

pub mod error_tests;

/// A migrated in-memory database. One connection, never recycled, so the data
/// lives as long as the pool.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    crate::db::init_db(&pool).await.unwrap();
    pool
}

pub async fn setup_test_app() -> (Router, AppState) {
    let pool = memory_pool().await;
    let state = AppState::new(pool, AppConfig::default());
    (crate::routes::router(state.clone()), state)
}

/// Sends a request with an optional JSON body and decodes the JSON response.
/// Non-JSON bodies come back as a JSON string.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    dispatch(app, request).await
}

/// Sends a raw body as-is, for payloads that are not valid JSON.
pub async fn send_raw(app: &Router, method: &str, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}
