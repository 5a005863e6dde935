use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Side;

// ---------------------------------------------------------------------------
// Trades
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiTrade {
    pub id: String,
    pub market_ticker: String,
    #[serde(default)]
    pub market_title: String,
    pub side: Side,
    pub count: u32,
    pub yes_price: u32,
    pub no_price: u32,
    pub created_time: DateTime<Utc>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default = "default_trade_type")]
    pub trade_type: String,
    #[serde(default = "default_is_taker")]
    pub is_taker: bool,
}

fn default_trade_type() -> String {
    "buy".into()
}

fn default_is_taker() -> bool {
    true
}

/// Response envelope of `GET /users/{user_id}/trades`.
#[derive(Debug, Clone, Deserialize)]
pub struct TradesResponse {
    #[serde(default)]
    pub trades: Vec<ApiTrade>,
}

// ---------------------------------------------------------------------------
// Markets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiMarket {
    pub ticker: String,
    #[serde(default)]
    pub title: String,
    pub yes_price: u32,
    pub no_price: u32,
}

impl ApiMarket {
    /// Live quote for one side of the book, in cents.
    pub fn price_for(&self, side: Side) -> u32 {
        match side {
            Side::Yes => self.yes_price,
            Side::No => self.no_price,
        }
    }
}

/// Response envelope of `GET /markets/{ticker}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketResponse {
    pub market: ApiMarket,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Session {
    pub token: String,
    #[serde(alias = "member_id")]
    pub user_id: String,
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
    Limit,
}

#[derive(Debug, Serialize)]
pub struct OrderRequest<'a> {
    pub side: Side,
    pub count: u32,
    pub price: u32,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub action: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OrderResponse {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
