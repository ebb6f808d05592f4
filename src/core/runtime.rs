//! One evaluation cycle over the configured instruments

use crate::indicators::IndicatorError;
use crate::metrics::Metrics;
use crate::models::indicators::{IndicatorParams, IndicatorSnapshot};
use crate::models::signal::{SignalAlert, Thresholds};
use crate::services::market_data::MarketDataProvider;
use crate::services::notifier::Notifier;
use crate::signals::{evaluate, RearmState};
use chrono::Local;
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Configuration for the evaluation runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub symbols: Vec<String>,
    pub candle_interval: String,
    pub thresholds: Thresholds,
    pub params: IndicatorParams,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            symbols: vec!["BTCUSDC".to_string()],
            candle_interval: "5m".to_string(),
            thresholds: Thresholds::default(),
            params: IndicatorParams::default(),
        }
    }
}

/// Everything a cycle needs: configuration, collaborators and the re-arm state.
///
/// The re-arm state is owned here and shared by every cycle of the process.
pub struct CycleContext {
    pub config: RuntimeConfig,
    pub data_provider: Arc<dyn MarketDataProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub state: Arc<RearmState>,
    pub metrics: Option<Arc<Metrics>>,
}

impl CycleContext {
    pub fn new(
        config: RuntimeConfig,
        data_provider: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            data_provider,
            notifier,
            state: Arc::new(RearmState::new()),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_state(mut self, state: Arc<RearmState>) -> Self {
        self.state = state;
        self
    }
}

/// What happened to one instrument during a cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum InstrumentOutcome {
    /// Signal passed the gate and was handed to the notifier.
    Fired { price: f64, delivered: bool },
    /// Thresholds met but the re-arm gate held it back.
    Suppressed { price: f64 },
    NoSignal,
    InsufficientData { required: usize, actual: usize },
    FetchFailed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    pub outcomes: Vec<(String, InstrumentOutcome)>,
}

impl CycleReport {
    pub fn outcome(&self, symbol: &str) -> Option<&InstrumentOutcome> {
        self.outcomes
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, outcome)| outcome)
    }

    pub fn fired(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, InstrumentOutcome::Fired { .. }))
            .count()
    }

    /// True when every instrument failed to fetch; false for an empty report.
    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.failures() == self.outcomes.len()
    }

    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, InstrumentOutcome::FetchFailed(_)))
            .count()
    }
}

/// Evaluate every configured instrument once.
///
/// Instruments are processed concurrently and independently: a failure for one
/// is logged and recorded in the report without affecting the others.
pub async fn run_cycle(ctx: &CycleContext) -> CycleReport {
    let start = Instant::now();

    let outcomes = join_all(ctx.config.symbols.iter().map(|symbol| async move {
        let outcome = evaluate_instrument(ctx, symbol).await;
        (symbol.clone(), outcome)
    }))
    .await;

    let report = CycleReport { outcomes };
    let duration = start.elapsed();

    if let Some(ref metrics) = ctx.metrics {
        metrics.cycles_total.inc();
        metrics
            .cycle_duration_seconds
            .observe(duration.as_secs_f64());
    }

    info!(
        instruments = report.outcomes.len(),
        fired = report.fired(),
        failures = report.failures(),
        duration_ms = duration.as_millis() as u64,
        "Cycle complete: {} instruments, {} fired, {} failed",
        report.outcomes.len(),
        report.fired(),
        report.failures()
    );

    report
}

/// Fetch, compute, evaluate and gate a single instrument.
pub async fn evaluate_instrument(ctx: &CycleContext, symbol: &str) -> InstrumentOutcome {
    let params = &ctx.config.params;
    let thresholds = &ctx.config.thresholds;

    let closes = match ctx
        .data_provider
        .fetch_closes(symbol, &ctx.config.candle_interval, params.required_closes())
        .await
    {
        Ok(closes) => closes,
        Err(e) => {
            error!(symbol = %symbol, error = %e, "Failed to fetch candles for {}", symbol);
            if let Some(ref metrics) = ctx.metrics {
                metrics.fetch_failures_total.inc();
            }
            return InstrumentOutcome::FetchFailed(e.to_string());
        }
    };

    let snapshot = match IndicatorSnapshot::from_closes(&closes, params) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(symbol = %symbol, error = %e, "Skipping {}: {}", symbol, e);
            return match e {
                IndicatorError::InsufficientData { required, actual } => {
                    InstrumentOutcome::InsufficientData { required, actual }
                }
            };
        }
    };

    if let Some(ref metrics) = ctx.metrics {
        metrics.instruments_evaluated_total.inc();
    }

    debug!(
        symbol = %symbol,
        rsi = ?snapshot.rsi,
        percent_b = ?snapshot.percent_b,
        price = snapshot.last_price,
        "Indicators for {}",
        symbol
    );

    if snapshot.percent_b.is_none() {
        debug!(symbol = %symbol, "Bollinger bands collapsed for {}, %B undefined", symbol);
    }

    let signal = evaluate(&snapshot, thresholds);
    let price = snapshot.last_price;
    let fire = ctx
        .state
        .should_fire(symbol, price, signal, thresholds.rearm_drop_fraction)
        .await;

    if !fire {
        return if signal {
            InstrumentOutcome::Suppressed { price }
        } else {
            InstrumentOutcome::NoSignal
        };
    }

    let alert = SignalAlert {
        symbol: symbol.to_string(),
        price,
        rsi: snapshot.rsi.unwrap_or_default(),
        percent_b: snapshot.percent_b.unwrap_or_default(),
        fired_at: Local::now(),
    };

    info!(
        symbol = %symbol,
        price = price,
        rsi = alert.rsi,
        percent_b = alert.percent_b,
        "Signal fired for {} at {}",
        symbol,
        price
    );

    if let Some(ref metrics) = ctx.metrics {
        metrics.signals_fired_total.inc();
    }

    // The gate has already committed; delivery failures do not roll it back.
    let delivered = match ctx.notifier.notify(&alert.render()).await {
        Ok(()) => true,
        Err(e) => {
            error!(symbol = %symbol, error = %e, "Failed to deliver alert for {}", symbol);
            if let Some(ref metrics) = ctx.metrics {
                metrics.notify_failures_total.inc();
            }
            false
        }
    };

    InstrumentOutcome::Fired { price, delivered }
}
