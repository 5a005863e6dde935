use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use thiserror::Error;

use crate::models::Side;

use super::types::{
    ApiMarket, ApiTrade, LoginRequest, MarketResponse, OrderRequest, OrderResponse, OrderType,
    Session, TradesResponse,
};
use super::Exchange;

/// Fixed per-call timeout for every exchange request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// REST client for the Kalshi trade API. Holds the bearer token issued at
/// login; every other call attaches it when present.
pub struct KalshiClient {
    http: Client,
    base_url: String,
    session: RwLock<Option<Session>>,
}

impl KalshiClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            session: RwLock::new(None),
        }
    }

    fn bearer_token(&self) -> Option<String> {
        self.session
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.token.clone())
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let mut req = self.http.get(format!("{}{}", self.base_url, path));
        if let Some(token) = self.bearer_token() {
            req = req.bearer_auth(token);
        }
        req
    }
}

#[async_trait]
impl Exchange for KalshiClient {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, ExchangeError> {
        let url = format!("{}/login", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ExchangeError::Auth("invalid credentials".into()));
        }

        let session: Session = resp.error_for_status()?.json().await?;
        *self.session.write().expect("session lock poisoned") = Some(session.clone());

        tracing::info!(user_id = %session.user_id, "Authenticated with Kalshi");
        Ok(session)
    }

    async fn list_user_trades(&self, user_id: &str, limit: u32) -> Vec<ApiTrade> {
        let path = format!("/users/{user_id}/trades");
        let result: Result<TradesResponse, ExchangeError> = async {
            let resp = self
                .get(&path)
                .query(&[("limit", limit)])
                .send()
                .await?
                .error_for_status()?;
            Ok(resp.json::<TradesResponse>().await?)
        }
        .await;

        match result {
            Ok(body) => body.trades,
            Err(e) => {
                tracing::warn!(error = %e, user_id, "Failed to fetch user trades");
                Vec::new()
            }
        }
    }

    async fn get_market(&self, ticker: &str) -> Option<ApiMarket> {
        let path = format!("/markets/{ticker}");
        let result: Result<MarketResponse, ExchangeError> = async {
            let resp = self.get(&path).send().await?.error_for_status()?;
            Ok(resp.json::<MarketResponse>().await?)
        }
        .await;

        match result {
            Ok(body) => Some(body.market),
            Err(e) => {
                tracing::warn!(error = %e, ticker, "Failed to fetch market");
                None
            }
        }
    }

    async fn place_order(
        &self,
        ticker: &str,
        side: Side,
        count: u32,
        price: u32,
        order_type: OrderType,
    ) -> Result<OrderResponse, ExchangeError> {
        let url = format!("{}/markets/{}/orders", self.base_url, ticker);
        let mut req = self.http.post(&url).json(&OrderRequest {
            side,
            count,
            price,
            order_type,
            action: "buy",
        });
        if let Some(token) = self.bearer_token() {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?.error_for_status()?;
        Ok(resp.json().await?)
    }

    fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .expect("session lock poisoned")
            .is_some()
    }
}
