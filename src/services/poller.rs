use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::engine::CopyEngine;

/// Timer-driven poll loop. The engine owns no cadence of its own; this task
/// (plus the explicit `POST /api/refresh` endpoint) decides when
/// `poll_for_new_trades` runs.
pub async fn run_trade_poller(engine: Arc<Mutex<CopyEngine>>, interval_secs: u64) {
    tracing::info!(interval_secs, "Trade poller started");

    loop {
        sleep(Duration::from_secs(interval_secs)).await;

        let mut engine = engine.lock().await;
        if !engine.is_monitoring() {
            continue;
        }

        let new_trades = engine.poll_for_new_trades().await;
        if new_trades > 0 {
            tracing::info!(new_trades, "Poll cycle found {} new trades", new_trades);
        }
    }
}
