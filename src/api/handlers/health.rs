use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds();
    Json(json!({ "status": "healthy", "uptime_secs": uptime_secs }))
}
