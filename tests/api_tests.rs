use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::sync::Mutex;
use tower::ServiceExt;

use copybot::api::router::create_router;
use copybot::config::AppConfig;
use copybot::engine::CopyEngine;
use copybot::kalshi::demo::DEMO_USER_ID;
use copybot::kalshi::{DemoExchange, DynExchange};
use copybot::AppState;

/// One recorder handle for the whole test binary; installing the global
/// Prometheus recorder twice panics.
fn test_metrics_handle() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE
        .get_or_init(|| PrometheusBuilder::new().build_recorder().handle())
        .clone()
}

fn build_test_app() -> axum::Router {
    let exchange: DynExchange = Arc::new(DemoExchange::new());
    let config = AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        kalshi_email: None,
        kalshi_password: None,
        kalshi_api_base: "http://localhost".into(),
        target_user_id: None,
        max_copy_amount: 100,
        auto_copy_enabled: true,
        poll_interval_secs: 10,
    };
    let engine = CopyEngine::new(
        Arc::clone(&exchange),
        config.max_copy_amount,
        config.auto_copy_enabled,
    );

    let state = AppState {
        engine: Arc::new(Mutex::new(engine)),
        exchange,
        config,
        metrics_handle: test_metrics_handle(),
        demo_mode: true,
        started_at: chrono::Utc::now(),
    };
    create_router(state)
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = build_test_app();

    let resp = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_metrics_endpoint_renders() {
    let app = build_test_app();

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_status_reports_demo_and_flags() {
    let app = build_test_app();

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["demo_mode"], true);
    assert_eq!(json["is_authenticated"], true);
    assert_eq!(json["target_user_id"], "");
    assert_eq!(json["auto_copy_enabled"], true);
}

#[tokio::test]
async fn test_toggle_auto_copy_flips() {
    let app = build_test_app();

    let resp = app
        .clone()
        .oneshot(json_post("/api/toggle_auto_copy", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["auto_copy_enabled"], false);

    let resp = app
        .oneshot(json_post("/api/toggle_auto_copy", serde_json::json!({})))
        .await
        .unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["auto_copy_enabled"], true);
}

#[tokio::test]
async fn test_set_target_seeds_trades() {
    let app = build_test_app();

    let resp = app
        .clone()
        .oneshot(json_post(
            "/api/set_target",
            serde_json::json!({ "user_id": DEMO_USER_ID }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    // 15 seeded trades, plus at most one fresh demo trade per fetch.
    let loaded = json["loaded"].as_u64().unwrap();
    assert!(loaded >= 15);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/trades")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["trades"].as_array().unwrap().len() as u64, loaded);
    assert_eq!(json["stats"]["copied_trades"], 0);
    assert_eq!(json["stats"]["is_monitoring"], true);

    // Seeded history is never marked copied by the fetch itself.
    for trade in json["trades"].as_array().unwrap() {
        assert_eq!(trade["copied"], false);
        assert!(trade["copy_timestamp"].is_null());
        let yes = trade["yes_price"].as_u64().unwrap();
        let no = trade["no_price"].as_u64().unwrap();
        assert_eq!(yes + no, 100);
    }
}

#[tokio::test]
async fn test_manual_copy_after_seed() {
    let app = build_test_app();

    app.clone()
        .oneshot(json_post(
            "/api/set_target",
            serde_json::json!({ "user_id": DEMO_USER_ID }),
        ))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(json_post(
            "/api/copy_trade",
            serde_json::json!({ "trade_id": "trade_000" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["success"], true);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/trades")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["stats"]["copied_trades"], 1);
}

#[tokio::test]
async fn test_copy_trade_unknown_id_is_404() {
    let app = build_test_app();

    let resp = app
        .oneshot(json_post(
            "/api/copy_trade",
            serde_json::json!({ "trade_id": "no-such-trade" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("no-such-trade"));
}

#[tokio::test]
async fn test_authenticate_demo() {
    let app = build_test_app();

    let resp = app
        .oneshot(json_post(
            "/api/authenticate",
            serde_json::json!({ "email": "op@example.com", "password": "hunter2" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["token"], "demo-token");
}

#[tokio::test]
async fn test_refresh_polls_without_error() {
    let app = build_test_app();

    app.clone()
        .oneshot(json_post(
            "/api/set_target",
            serde_json::json!({ "user_id": DEMO_USER_ID }),
        ))
        .await
        .unwrap();

    let resp = app
        .oneshot(json_post("/api/refresh", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    assert!(json["new_trades"].as_u64().is_some());
}
