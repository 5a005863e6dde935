use std::env;

const DEFAULT_API_BASE: &str = "https://trading-api.kalshi.com/trade-api/v2";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Kalshi credentials (optional — demo mode needs none)
    pub kalshi_email: Option<String>,
    pub kalshi_password: Option<String>,
    pub kalshi_api_base: String,

    // Copy policy
    pub target_user_id: Option<String>,
    pub max_copy_amount: u32,
    pub auto_copy_enabled: bool,
    pub poll_interval_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5001".into())
                .parse()?,

            kalshi_email: env::var("KALSHI_EMAIL").ok(),
            kalshi_password: env::var("KALSHI_PASSWORD").ok(),
            kalshi_api_base: env::var("KALSHI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.into()),

            target_user_id: env::var("TARGET_USER_ID").ok().filter(|s| !s.is_empty()),
            max_copy_amount: env::var("MAX_COPY_AMOUNT")
                .unwrap_or_else(|_| "100".into())
                .parse()
                .unwrap_or(100),
            auto_copy_enabled: env::var("AUTO_COPY_ENABLED")
                .unwrap_or_else(|_| "true".into())
                .parse()
                .unwrap_or(true),
            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),
        })
    }

    /// Returns true if both Kalshi credentials are configured.
    pub fn has_kalshi_credentials(&self) -> bool {
        self.kalshi_email.is_some() && self.kalshi_password.is_some()
    }
}
