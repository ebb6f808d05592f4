//! Full cycle against mocked Binance and Telegram endpoints

use super::test_utils::{mock_binance_error, mock_binance_klines, mock_telegram_ok, OVERSOLD};
use dipwatch::core::runtime::{run_cycle, CycleContext, InstrumentOutcome, RuntimeConfig};
use dipwatch::models::signal::Thresholds;
use dipwatch::services::binance::BinanceMarketDataProvider;
use dipwatch::services::notifier::TelegramNotifier;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

fn build_context(binance: &MockServer, telegram: &MockServer, symbols: &[&str]) -> CycleContext {
    let provider = BinanceMarketDataProvider::new(binance.uri(), Duration::from_secs(5))
        .expect("build market data client");
    let notifier = TelegramNotifier::new(telegram.uri(), "123:abc", "42", Duration::from_secs(5))
        .expect("build notifier");

    let config = RuntimeConfig {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        thresholds: Thresholds {
            rsi_max: 32.0,
            percent_b_max: 0.20,
            rearm_drop_fraction: 0.01,
        },
        ..RuntimeConfig::default()
    };
    CycleContext::new(config, Arc::new(provider), Arc::new(notifier))
}

#[tokio::test]
async fn oversold_instrument_triggers_telegram_message() {
    let binance = MockServer::start().await;
    let telegram = MockServer::start().await;
    mock_binance_klines(&binance, "BTCUSDC", &OVERSOLD).await;
    mock_telegram_ok(&telegram, "123:abc").await;

    let ctx = build_context(&binance, &telegram, &["BTCUSDC"]);
    let report = run_cycle(&ctx).await;

    assert_eq!(
        report.outcome("BTCUSDC"),
        Some(&InstrumentOutcome::Fired {
            price: 98.2,
            delivered: true
        })
    );
    assert_eq!(ctx.state.last_price("BTCUSDC").await, Some(98.2));

    let requests = telegram.received_requests().await.expect("recorded requests");
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let text = body["text"].as_str().unwrap();
    assert!(text.contains("BTCUSDC"));
    assert!(text.contains("Price: 98.20"));
    assert_eq!(body["chat_id"], "42");
}

#[tokio::test]
async fn failing_symbol_does_not_block_the_others() {
    let binance = MockServer::start().await;
    let telegram = MockServer::start().await;
    mock_binance_error(&binance, "TONUSDC").await;
    mock_binance_klines(&binance, "ETHUSDC", &OVERSOLD).await;
    mock_telegram_ok(&telegram, "123:abc").await;

    let ctx = build_context(&binance, &telegram, &["TONUSDC", "ETHUSDC"]);
    let report = run_cycle(&ctx).await;

    assert!(matches!(
        report.outcome("TONUSDC"),
        Some(InstrumentOutcome::FetchFailed(_))
    ));
    assert!(matches!(
        report.outcome("ETHUSDC"),
        Some(InstrumentOutcome::Fired { delivered: true, .. })
    ));
    assert_eq!(telegram.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unreachable_telegram_still_commits_gate() {
    let binance = MockServer::start().await;
    let telegram = MockServer::start().await;
    mock_binance_klines(&binance, "SUIUSDC", &OVERSOLD).await;

    // No Telegram mock mounted: wiremock answers 404.
    let ctx = build_context(&binance, &telegram, &["SUIUSDC"]);
    let report = run_cycle(&ctx).await;

    assert_eq!(
        report.outcome("SUIUSDC"),
        Some(&InstrumentOutcome::Fired {
            price: 98.2,
            delivered: false
        })
    );

    let report = run_cycle(&ctx).await;
    assert_eq!(
        report.outcome("SUIUSDC"),
        Some(&InstrumentOutcome::Suppressed { price: 98.2 })
    );
}
