//! HTTP route handlers.
//!
//! - `health`: liveness, readiness, version and counters
//! - `resource`: the generic CRUD handlers mounted for every entity under `/api`

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

pub mod health;
pub mod resource;

pub use resource::{child_resource_routes, resource_routes};

const BODY_LIMIT: usize = 1024 * 1024;

/// Builds the complete application router.
pub fn router(state: AppState) -> Router {
    let metrics = state.metrics.clone();
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/metrics/prometheus", get(health::metrics_prometheus))
        .route("/version", get(health::version))
        .merge(resource_routes::<_, AppState>(state.categories.clone(), metrics.clone()))
        .merge(resource_routes::<_, AppState>(state.products.clone(), metrics.clone()))
        .merge(resource_routes::<_, AppState>(state.users.clone(), metrics.clone()))
        .merge(resource_routes::<_, AppState>(state.inquiries.clone(), metrics.clone()))
        .merge(resource_routes::<_, AppState>(state.suppliers.clone(), metrics.clone()))
        .merge(child_resource_routes::<_, _, AppState>(
            state.inventory.clone(),
            state.products.clone(),
            metrics,
        ))
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
