use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;

use copybot::api::router::create_router;
use copybot::config::AppConfig;
use copybot::engine::CopyEngine;
use copybot::kalshi::client::REQUEST_TIMEOUT;
use copybot::kalshi::demo::DEMO_USER_ID;
use copybot::kalshi::{DemoExchange, DynExchange, KalshiClient};
use copybot::services::poller::run_trade_poller;
use copybot::AppState;

#[derive(Parser, Debug)]
#[command(name = "copybot", about = "Kalshi copy-trading bot")]
struct Args {
    /// Run against a synthetic exchange instead of Kalshi.
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    let metrics_handle = copybot::metrics::init_metrics();

    let exchange: DynExchange = if args.demo {
        tracing::info!("Running in DEMO mode with synthetic trades");
        Arc::new(DemoExchange::new())
    } else {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Arc::new(KalshiClient::new(http, config.kalshi_api_base.clone()))
    };

    if !args.demo {
        if let (Some(email), Some(password)) = (&config.kalshi_email, &config.kalshi_password) {
            match exchange.authenticate(email, password).await {
                Ok(_) => tracing::info!("Authenticated with Kalshi"),
                Err(e) => tracing::error!(error = %e, "Kalshi authentication failed"),
            }
        } else {
            tracing::warn!("KALSHI_EMAIL / KALSHI_PASSWORD not set — running unauthenticated");
        }
    }

    let mut engine = CopyEngine::new(
        Arc::clone(&exchange),
        config.max_copy_amount,
        config.auto_copy_enabled,
    );

    let target = if args.demo {
        Some(DEMO_USER_ID.to_string())
    } else {
        config.target_user_id.clone()
    };
    if let Some(target) = target {
        engine.set_target(&target);
        let loaded = engine.load_initial_trades().await;
        tracing::info!(target = %target, loaded, "Monitoring target user");
    } else {
        tracing::warn!("TARGET_USER_ID not set — monitoring disabled until /api/set_target");
    }

    let engine = Arc::new(Mutex::new(engine));

    let poller_engine = Arc::clone(&engine);
    let interval = config.poll_interval_secs;
    tokio::spawn(async move {
        run_trade_poller(poller_engine, interval).await;
    });

    let state = AppState {
        engine,
        exchange,
        config,
        metrics_handle,
        demo_mode: args.demo,
        started_at: chrono::Utc::now(),
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
