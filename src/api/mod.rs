//! Axum HTTP surface for the storage calculators.

pub mod storage;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/storage/defaults", get(storage::get_defaults))
        .route("/api/storage/shared-params", get(storage::get_shared_params))
        .route("/api/storage/footprint", post(storage::estimate))
        .route("/api/storage/plan", post(storage::plan))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
