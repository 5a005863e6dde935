use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::AppState;

#[derive(Deserialize)]
pub struct SetTargetBody {
    pub user_id: String,
}

/// POST /api/set_target — switch the monitored trader and reseed the
/// baseline from their history.
pub async fn set_target(
    State(state): State<AppState>,
    Json(body): Json<SetTargetBody>,
) -> Json<serde_json::Value> {
    let mut engine = state.engine.lock().await;
    engine.set_target(&body.user_id);
    let loaded = engine.load_initial_trades().await;
    tracing::info!(target = %engine.target_user_id(), loaded, "Target user set");
    Json(json!({ "success": true, "loaded": loaded }))
}

/// GET /api/status — demo flag, auth state, target, auto-copy flag.
pub async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let engine = state.engine.lock().await;
    Json(json!({
        "demo_mode": state.demo_mode,
        "is_authenticated": state.exchange.is_authenticated(),
        "target_user_id": engine.target_user_id(),
        "auto_copy_enabled": engine.auto_copy_enabled(),
        "max_copy_amount": state.config.max_copy_amount,
    }))
}

/// POST /api/toggle_auto_copy — flip the auto-copy switch.
pub async fn toggle_auto_copy(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut engine = state.engine.lock().await;
    let enabled = engine.toggle_auto_copy();
    tracing::info!(enabled, "Auto-copy toggled");
    Json(json!({ "auto_copy_enabled": enabled }))
}
