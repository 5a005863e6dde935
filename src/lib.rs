pub mod api;
pub mod config;
pub mod engine;
pub mod errors;
pub mod kalshi;
pub mod metrics;
pub mod models;
pub mod services;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::engine::CopyEngine;
use crate::kalshi::DynExchange;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Mutex<CopyEngine>>,
    pub exchange: DynExchange,
    pub config: AppConfig,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    pub demo_mode: bool,
    pub started_at: DateTime<Utc>,
}
