pub mod client;
pub mod demo;
pub mod types;

pub use client::{ExchangeError, KalshiClient};
pub use demo::DemoExchange;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::Side;
use types::{ApiMarket, ApiTrade, OrderResponse, OrderType, Session};

/// Exchange capability the engine is written against. Implemented by the
/// real Kalshi REST client and by the synthetic demo exchange; the variant
/// is picked once at startup, never inside engine logic.
#[async_trait]
pub trait Exchange: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, ExchangeError>;

    /// Recent trades for a user. Fetch failures are swallowed and logged at
    /// this boundary; the caller sees an empty page and keeps prior state.
    async fn list_user_trades(&self, user_id: &str, limit: u32) -> Vec<ApiTrade>;

    /// Current market snapshot, `None` on any failure (logged here).
    async fn get_market(&self, ticker: &str) -> Option<ApiMarket>;

    /// Submit a buy order. Transport and HTTP errors propagate.
    async fn place_order(
        &self,
        ticker: &str,
        side: Side,
        count: u32,
        price: u32,
        order_type: OrderType,
    ) -> Result<OrderResponse, ExchangeError>;

    fn is_authenticated(&self) -> bool;
}

pub type DynExchange = Arc<dyn Exchange>;
