use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Static liveness answer; does not touch the database or the LLM.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
