use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::Rng;

use crate::models::Side;

use super::types::{ApiMarket, ApiTrade, OrderResponse, OrderType, Session};
use super::{Exchange, ExchangeError};

pub const DEMO_USER_ID: &str = "demo-trader-123";

/// Probability that one poll surfaces a freshly generated trade.
const NEW_TRADE_CHANCE: f64 = 0.1;

const SEED_TITLES: &[&str] = &[
    "Will there be a major AI breakthrough announced this year?",
    "Will the Federal Reserve raise interest rates in March?",
    "Will Bitcoin be above $50,000 at the end of the year?",
    "Will the S&P 500 be above 4,500 by December 31st?",
    "Will US inflation be below 3% by end of Q4?",
    "Will Tesla stock be above $200 by end of year?",
    "Will there be a recession declared this year?",
    "Will a major tech IPO price above its range this quarter?",
];

const FRESH_TITLES: &[&str] = &[
    "Will crypto prices surge this week?",
    "Will the market close higher today?",
    "Will there be a major news announcement?",
];

/// Synthetic stand-in for the Kalshi API: a fixed seed history plus the
/// occasional fresh trade on poll. Orders always succeed.
pub struct DemoExchange {
    trades: Mutex<Vec<ApiTrade>>,
    next_seq: AtomicU64,
}

impl DemoExchange {
    pub fn new() -> Self {
        Self {
            trades: Mutex::new(seed_trades()),
            next_seq: AtomicU64::new(0),
        }
    }
}

impl Default for DemoExchange {
    fn default() -> Self {
        Self::new()
    }
}

/// Fifteen historical trades spread over four age buckets so every display
/// category shows up immediately.
fn seed_trades() -> Vec<ApiTrade> {
    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let mut trades = Vec::with_capacity(15);

    for i in 0..15 {
        let minutes_ago = match i {
            0..=2 => rng.gen_range(1..=4),
            3..=6 => rng.gen_range(10..=50),
            7..=11 => rng.gen_range(60..=600),
            _ => rng.gen_range(900..=4320),
        };
        let yes_price = rng.gen_range(30..=85);

        trades.push(ApiTrade {
            id: format!("trade_{i:03}"),
            market_ticker: format!("MARKET-{i:03}"),
            market_title: SEED_TITLES[rng.gen_range(0..SEED_TITLES.len())].to_string(),
            side: if rng.gen_bool(0.5) { Side::Yes } else { Side::No },
            count: rng.gen_range(1..=100),
            yes_price,
            no_price: 100 - yes_price,
            created_time: now - Duration::minutes(minutes_ago),
            user_id: DEMO_USER_ID.to_string(),
            trade_type: "buy".to_string(),
            is_taker: rng.gen_bool(0.5),
        });
    }

    trades.sort_by(|a, b| b.created_time.cmp(&a.created_time));
    trades
}

fn fresh_trade(seq: u64) -> ApiTrade {
    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let yes_price = rng.gen_range(40..=80);

    ApiTrade {
        id: format!("new_trade_{seq}_{}", now.timestamp()),
        market_ticker: format!("NEW-{}", rng.gen_range(100..1000)),
        market_title: FRESH_TITLES[rng.gen_range(0..FRESH_TITLES.len())].to_string(),
        side: if rng.gen_bool(0.5) { Side::Yes } else { Side::No },
        count: rng.gen_range(1..=50),
        yes_price,
        no_price: 100 - yes_price,
        created_time: now,
        user_id: DEMO_USER_ID.to_string(),
        trade_type: "buy".to_string(),
        is_taker: true,
    }
}

#[async_trait]
impl Exchange for DemoExchange {
    async fn authenticate(&self, _email: &str, _password: &str) -> Result<Session, ExchangeError> {
        Ok(Session {
            token: "demo-token".into(),
            user_id: "demo-user".into(),
        })
    }

    async fn list_user_trades(&self, _user_id: &str, limit: u32) -> Vec<ApiTrade> {
        let mut trades = self.trades.lock().expect("demo trades lock poisoned");

        if rand::thread_rng().gen_bool(NEW_TRADE_CHANCE) {
            let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
            trades.insert(0, fresh_trade(seq));
        }

        trades.iter().take(limit as usize).cloned().collect()
    }

    async fn get_market(&self, ticker: &str) -> Option<ApiMarket> {
        let yes_price = rand::thread_rng().gen_range(30..=85);
        Some(ApiMarket {
            ticker: ticker.to_string(),
            title: format!("Demo market {ticker}"),
            yes_price,
            no_price: 100 - yes_price,
        })
    }

    async fn place_order(
        &self,
        ticker: &str,
        side: Side,
        count: u32,
        price: u32,
        _order_type: OrderType,
    ) -> Result<OrderResponse, ExchangeError> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        tracing::info!(ticker, side = %side, count, price, "Demo: order filled");
        Ok(OrderResponse {
            order_id: Some(format!("demo-order-{seq}")),
            status: Some("executed".into()),
        })
    }

    fn is_authenticated(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_shape() {
        let trades = seed_trades();
        assert_eq!(trades.len(), 15);

        // Complementary cents pricing on every row.
        for t in &trades {
            assert_eq!(t.yes_price + t.no_price, 100);
            assert!(t.count >= 1);
            assert_eq!(t.user_id, DEMO_USER_ID);
        }

        // Newest first, unique ids.
        for pair in trades.windows(2) {
            assert!(pair[0].created_time >= pair[1].created_time);
        }
        let mut ids: Vec<_> = trades.iter().map(|t| t.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 15);
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let demo = DemoExchange::new();
        let page = demo.list_user_trades(DEMO_USER_ID, 5).await;
        assert_eq!(page.len(), 5);
        let page = demo.list_user_trades(DEMO_USER_ID, 50).await;
        assert!(page.len() >= 15);
    }

    #[tokio::test]
    async fn test_market_quote_is_complementary() {
        let demo = DemoExchange::new();
        let market = demo.get_market("MARKET-001").await.expect("demo quote");
        assert_eq!(market.yes_price + market.no_price, 100);
    }
}
