//! Route handlers.

pub mod auth;
pub mod data;
pub mod users;

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "message": "API is up and running" }))
}
