use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

use super::auth::require_auth;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    // Public routes — no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // API routes — require Bearer token when API_TOKEN is set
    let protected = Router::new()
        .route("/api/authenticate", post(handlers::auth::authenticate))
        .route("/api/set_target", post(handlers::control::set_target))
        .route("/api/trades", get(handlers::trades::list))
        .route("/api/refresh", post(handlers::trades::refresh))
        .route("/api/copy_trade", post(handlers::trades::copy_trade))
        .route("/api/status", get(handlers::control::status))
        .route("/api/toggle_auto_copy", post(handlers::control::toggle_auto_copy))
        .layer(middleware::from_fn(require_auth));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
