use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kalshi::types::ApiTrade;

use super::{AgeCategory, Side};

/// A tracked trade of the target user: the immutable exchange fact plus the
/// engine's copy state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub market_ticker: String,
    pub market_title: String,
    pub side: Side,
    pub count: u32,
    /// Cents; `yes_price + no_price == 100`.
    pub yes_price: u32,
    pub no_price: u32,
    pub created_time: DateTime<Utc>,
    pub user_id: String,
    pub trade_type: String,
    pub is_taker: bool,
    /// Monotonic: flips false to true once, never back.
    pub copied: bool,
    pub copy_timestamp: Option<DateTime<Utc>>,
    pub age_category: AgeCategory,
}

impl Trade {
    /// Build a tracked trade from an exchange row. Always starts uncopied.
    pub fn from_api(api: ApiTrade, now: DateTime<Utc>) -> Self {
        Self {
            age_category: AgeCategory::classify(api.created_time, now),
            id: api.id,
            market_ticker: api.market_ticker,
            market_title: api.market_title,
            side: api.side,
            count: api.count,
            yes_price: api.yes_price,
            no_price: api.no_price,
            created_time: api.created_time,
            user_id: api.user_id,
            trade_type: api.trade_type,
            is_taker: api.is_taker,
            copied: false,
            copy_timestamp: None,
        }
    }
}
