use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::errors::AppError;
use crate::AppState;

#[derive(Deserialize)]
pub struct AuthenticateBody {
    pub email: String,
    pub password: String,
}

/// POST /api/authenticate — log in to the exchange.
pub async fn authenticate(
    State(state): State<AppState>,
    Json(body): Json<AuthenticateBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let session = state
        .exchange
        .authenticate(&body.email, &body.password)
        .await
        .map_err(|e| AppError::Auth(e.to_string()))?;

    Ok(Json(json!({ "success": true, "data": session })))
}
