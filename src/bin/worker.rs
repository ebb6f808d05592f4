//! dipwatch worker
//!
//! Evaluates the configured instruments every interval and sends an alert
//! when RSI and Bollinger %B are both oversold.

use dipwatch::config::{get_environment, Config, NotifierConfig};
use dipwatch::core::http::{start_server, AppState};
use dipwatch::core::runtime::{CycleContext, RuntimeConfig};
use dipwatch::core::scheduler::CycleScheduler;
use dipwatch::logging;
use dipwatch::metrics::Metrics;
use dipwatch::services::binance::BinanceMarketDataProvider;
use dipwatch::services::market_data::MarketDataProvider;
use dipwatch::services::notifier::{LogNotifier, Notifier, TelegramNotifier};
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    info!(environment = %get_environment(), "Starting dipwatch worker");
    info!(symbols = ?config.symbols, "Symbols: {}", config.symbols.join(", "));
    info!(
        rsi_max = config.thresholds.rsi_max,
        percent_b_max = config.thresholds.percent_b_max,
        rearm_drop_fraction = config.thresholds.rearm_drop_fraction,
        interval = config.eval_interval_seconds,
        "Thresholds loaded"
    );

    let metrics = Arc::new(Metrics::new()?);

    let data_provider: Arc<dyn MarketDataProvider> = Arc::new(BinanceMarketDataProvider::new(
        config.binance_base_url.clone(),
        config.http_timeout,
    )?);

    let notifier: Arc<dyn Notifier> = match &config.notifier {
        NotifierConfig::Telegram {
            base_url,
            token,
            chat_id,
        } => Arc::new(TelegramNotifier::new(
            base_url.clone(),
            token.clone(),
            chat_id.clone(),
            config.http_timeout,
        )?),
        NotifierConfig::Log => {
            info!("Notifier: log only");
            Arc::new(LogNotifier)
        }
    };

    let runtime_config = RuntimeConfig {
        symbols: config.symbols.clone(),
        candle_interval: config.candle_interval.clone(),
        thresholds: config.thresholds,
        params: config.params,
    };
    let context = Arc::new(
        CycleContext::new(runtime_config, data_provider, notifier).with_metrics(metrics.clone()),
    );

    let app_state = AppState::new(metrics.clone(), context.state.clone());
    if config.port > 0 {
        let state = app_state.clone();
        let port = config.port;
        tokio::spawn(async move {
            if let Err(e) = start_server(port, state).await {
                error!(error = %e, "HTTP server error");
            }
        });
    }

    let scheduler = CycleScheduler::new(context, config.eval_interval_seconds)?
        .with_health(app_state.health.clone());
    scheduler.start().await;

    info!("Worker started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down worker...");
    scheduler.stop().await;
    info!("Worker stopped");

    Ok(())
}
