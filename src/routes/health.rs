use std::time::Duration;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use sqlx::SqlitePool;

use crate::db;
use crate::models::{Category, Entity, Inquiry, InventoryItem, Product, Supplier, User};
use crate::state::AppState;

const READY_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn healthz() -> impl IntoResponse {
    Json(json!({ "message": "Server is running" }))
}

/// 200 only when the database answers and every table `init_db` creates is there.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    match tokio::time::timeout(READY_TIMEOUT, missing_tables(&state.db)).await {
        Ok(Ok(missing)) if missing.is_empty() => (StatusCode::OK, "ready".to_string()),
        Ok(Ok(missing)) => (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("not ready: missing tables {}", missing.join(", ")),
        ),
        Ok(Err(e)) => (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: {}", e)),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: timeout".to_string()),
    }
}

async fn missing_tables(pool: &SqlitePool) -> sqlx::Result<Vec<&'static str>> {
    let present: Vec<String> = sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table'")
        .fetch_all(pool)
        .await?;
    Ok(db::TABLES
        .iter()
        .copied()
        .filter(|table| !present.iter().any(|p| p == table))
        .collect())
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.get_snapshot())
}

// Prometheus text exposition format
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot();
    let body = format!(
        "# HELP pharmacy_records_created Records created\n# TYPE pharmacy_records_created counter\npharmacy_records_created {}\n\
# HELP pharmacy_records_updated Records updated\n# TYPE pharmacy_records_updated counter\npharmacy_records_updated {}\n\
# HELP pharmacy_records_deleted Records deleted\n# TYPE pharmacy_records_deleted counter\npharmacy_records_deleted {}\n\
# HELP pharmacy_lookups_missed Requests for ids that do not exist\n# TYPE pharmacy_lookups_missed counter\npharmacy_lookups_missed {}\n\
# HELP pharmacy_uptime_seconds Uptime seconds\n# TYPE pharmacy_uptime_seconds gauge\npharmacy_uptime_seconds {}\n",
        m.records_created, m.records_updated, m.records_deleted, m.lookups_missed, m.uptime_seconds,
    );
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

/// Build information plus the collections served under `/api`.
pub async fn version() -> impl IntoResponse {
    let resources = [
        Category::COLLECTION,
        Product::COLLECTION,
        User::COLLECTION,
        Inquiry::COLLECTION,
        Supplier::COLLECTION,
        InventoryItem::COLLECTION,
    ];
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "resources": resources
            .iter()
            .map(|c| format!("/api/{}", c))
            .collect::<Vec<_>>(),
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    }))
}
