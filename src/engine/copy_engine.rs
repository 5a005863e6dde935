use std::collections::HashSet;

use chrono::{DateTime, Utc};
use metrics::counter;
use serde::Serialize;

use crate::kalshi::types::OrderType;
use crate::kalshi::DynExchange;
use crate::models::{AgeCategory, Trade};

/// Page sizes for the baseline snapshot and the recurring poll.
const INITIAL_PAGE_SIZE: u32 = 50;
const POLL_PAGE_SIZE: u32 = 20;

/// Outcome of a manual or automatic copy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Order placed, or the trade was already copied (copying is idempotent).
    Copied,
    /// Market lookup or order placement failed; nothing was mutated.
    Failed,
    /// No tracked trade with that id.
    NotFound,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub total_trades: usize,
    pub copied_trades: u64,
    pub start_time: DateTime<Utc>,
    pub is_monitoring: bool,
    pub target_user_id: String,
    pub last_update: DateTime<Utc>,
}

/// Tracks one target trader and mirrors their fills into the operator's
/// account. All state is in-process; `known_trade_ids` and `start_time`
/// reset only when the process restarts.
pub struct CopyEngine {
    exchange: DynExchange,
    target_user_id: String,
    trades: Vec<Trade>,
    known_trade_ids: HashSet<String>,
    start_time: DateTime<Utc>,
    copied_count: u64,
    auto_copy_enabled: bool,
    max_copy_amount: u32,
}

impl CopyEngine {
    pub fn new(exchange: DynExchange, max_copy_amount: u32, auto_copy_enabled: bool) -> Self {
        Self {
            exchange,
            target_user_id: String::new(),
            trades: Vec::new(),
            known_trade_ids: HashSet::new(),
            start_time: Utc::now(),
            copied_count: 0,
            auto_copy_enabled,
            max_copy_amount,
        }
    }

    /// Point the engine at a new target. The caller must follow up with
    /// [`load_initial_trades`](Self::load_initial_trades) to resync the
    /// baseline. An empty id disables monitoring.
    pub fn set_target(&mut self, user_id: &str) {
        self.target_user_id = user_id.trim().to_string();
    }

    pub fn target_user_id(&self) -> &str {
        &self.target_user_id
    }

    pub fn is_monitoring(&self) -> bool {
        !self.target_user_id.is_empty()
    }

    pub fn auto_copy_enabled(&self) -> bool {
        self.auto_copy_enabled
    }

    pub fn toggle_auto_copy(&mut self) -> bool {
        self.auto_copy_enabled = !self.auto_copy_enabled;
        self.auto_copy_enabled
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Age categories are display metadata; recompute on every read rather
    /// than caching across polls.
    pub fn refresh_age_categories(&mut self) {
        let now = Utc::now();
        for trade in &mut self.trades {
            trade.age_category = AgeCategory::classify(trade.created_time, now);
        }
    }

    /// Seed the baseline from the target's trade history. Every returned id
    /// becomes known and nothing is copied: history is the starting point,
    /// not a signal. Replaces the tracked list entirely.
    pub async fn load_initial_trades(&mut self) -> usize {
        if !self.is_monitoring() {
            return 0;
        }

        let page = self
            .exchange
            .list_user_trades(&self.target_user_id, INITIAL_PAGE_SIZE)
            .await;
        let now = Utc::now();

        let mut trades: Vec<Trade> = Vec::with_capacity(page.len());
        for api in page {
            self.known_trade_ids.insert(api.id.clone());
            trades.push(Trade::from_api(api, now));
        }
        trades.sort_by(|a, b| b.created_time.cmp(&a.created_time));

        let loaded = trades.len();
        self.trades = trades;
        self.copied_count = 0;

        tracing::info!(target = %self.target_user_id, loaded, "Initial trades loaded");
        loaded
    }

    /// One poll cycle: fetch a recent page, keep ids not seen before that
    /// were created strictly after the engine started, prepend them as a
    /// contiguous batch and auto-copy if enabled. A poll with no new
    /// activity is a no-op. Returns the number of new trades.
    pub async fn poll_for_new_trades(&mut self) -> usize {
        if !self.is_monitoring() {
            return 0;
        }

        counter!("poll_cycles_total").increment(1);
        let page = self
            .exchange
            .list_user_trades(&self.target_user_id, POLL_PAGE_SIZE)
            .await;
        let now = Utc::now();

        let mut fresh: Vec<Trade> = Vec::new();
        for api in page {
            if self.known_trade_ids.contains(&api.id) {
                continue;
            }
            // The API may return backfilled rows older than our first
            // observation; those are history, not new activity.
            if api.created_time <= self.start_time {
                continue;
            }
            self.known_trade_ids.insert(api.id.clone());
            fresh.push(Trade::from_api(api, now));
        }

        if fresh.is_empty() {
            return 0;
        }

        let detected = fresh.len();
        counter!("trades_detected_total").increment(detected as u64);

        // Copies run in arrival order even though the displayed batch is
        // re-sorted below.
        let copy_ids: Vec<String> = fresh.iter().map(|t| t.id.clone()).collect();

        // Prepend as one contiguous batch, newest first. The API's return
        // order is not trusted; the engine re-establishes the invariant.
        fresh.sort_by(|a, b| b.created_time.cmp(&a.created_time));
        fresh.append(&mut self.trades);
        self.trades = fresh;

        tracing::info!(
            target = %self.target_user_id,
            new_trades = detected,
            "Poll found {} new trades",
            detected
        );

        if self.auto_copy_enabled {
            for id in &copy_ids {
                if self.copy_trade(id).await == CopyOutcome::Failed {
                    tracing::warn!(trade_id = %id, "Auto-copy failed; trade left uncopied");
                }
            }
        }

        detected
    }

    /// Replicate one tracked trade into the operator's account at the live
    /// market price, capped at `max_copy_amount` contracts. Idempotent: an
    /// already-copied trade is a success with no second order. Any failure
    /// leaves the trade untouched and is never retried here.
    pub async fn copy_trade(&mut self, trade_id: &str) -> CopyOutcome {
        let Some(idx) = self.trades.iter().position(|t| t.id == trade_id) else {
            return CopyOutcome::NotFound;
        };
        if self.trades[idx].copied {
            return CopyOutcome::Copied;
        }

        let (ticker, side, count) = {
            let t = &self.trades[idx];
            (t.market_ticker.clone(), t.side, t.count)
        };
        let copy_amount = count.min(self.max_copy_amount);

        // Fresh quote: replication uses live pricing, not the original fill.
        let Some(market) = self.exchange.get_market(&ticker).await else {
            counter!("copy_failures_total").increment(1);
            tracing::warn!(trade_id, ticker = %ticker, "No market quote; copy aborted");
            return CopyOutcome::Failed;
        };
        let price = market.price_for(side);

        match self
            .exchange
            .place_order(&ticker, side, copy_amount, price, OrderType::Market)
            .await
        {
            Ok(order) => {
                let trade = &mut self.trades[idx];
                trade.copied = true;
                trade.copy_timestamp = Some(Utc::now());
                self.copied_count += 1;
                counter!("trades_copied_total").increment(1);
                tracing::info!(
                    trade_id,
                    ticker = %ticker,
                    side = %side,
                    count = copy_amount,
                    price,
                    order_id = ?order.order_id,
                    "Trade copied"
                );
                CopyOutcome::Copied
            }
            Err(e) => {
                counter!("copy_failures_total").increment(1);
                tracing::error!(trade_id, ticker = %ticker, error = %e, "Order placement failed");
                CopyOutcome::Failed
            }
        }
    }

    /// Read-only snapshot of engine bookkeeping.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            total_trades: self.trades.len(),
            copied_trades: self.copied_count,
            start_time: self.start_time,
            is_monitoring: self.is_monitoring(),
            target_user_id: self.target_user_id.clone(),
            last_update: Utc::now(),
        }
    }
}
