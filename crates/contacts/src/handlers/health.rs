use axum::Json;
use serde_json::{json, Value};

/// GET /health - liveness probe, no auth.
#[axum::debug_handler]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
