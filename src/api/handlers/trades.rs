use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::engine::{CopyOutcome, EngineStats};
use crate::errors::AppError;
use crate::models::Trade;
use crate::AppState;

#[derive(Serialize)]
pub struct TradeList {
    pub trades: Vec<Trade>,
    pub stats: EngineStats,
}

/// GET /api/trades — current tracked trades plus engine stats. Read-only:
/// polling cadence belongs to the poller task and POST /api/refresh.
pub async fn list(State(state): State<AppState>) -> Json<TradeList> {
    let mut engine = state.engine.lock().await;
    engine.refresh_age_categories();
    Json(TradeList {
        trades: engine.trades().to_vec(),
        stats: engine.stats(),
    })
}

/// POST /api/refresh — poll the exchange for new trades right now.
pub async fn refresh(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut engine = state.engine.lock().await;
    let new_trades = engine.poll_for_new_trades().await;
    Json(json!({ "success": true, "new_trades": new_trades }))
}

#[derive(Deserialize)]
pub struct CopyTradeBody {
    pub trade_id: String,
}

/// POST /api/copy_trade — manually copy one tracked trade by id.
/// 404 for an id the engine has never tracked; a failed placement is a
/// 200 with `success: false` (the operator may simply try again).
pub async fn copy_trade(
    State(state): State<AppState>,
    Json(body): Json<CopyTradeBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut engine = state.engine.lock().await;
    match engine.copy_trade(&body.trade_id).await {
        CopyOutcome::Copied => Ok(Json(json!({ "success": true }))),
        CopyOutcome::Failed => Ok(Json(json!({ "success": false }))),
        CopyOutcome::NotFound => Err(AppError::NotFound(format!(
            "trade {} not tracked",
            body.trade_id
        ))),
    }
}
