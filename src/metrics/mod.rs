//! Prometheus metrics for evaluation cycles

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub cycles_total: IntCounter,
    pub instruments_evaluated_total: IntCounter,
    pub signals_fired_total: IntCounter,
    pub fetch_failures_total: IntCounter,
    pub notify_failures_total: IntCounter,
    pub cycle_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let cycles_total = IntCounter::new("cycles_total", "Completed evaluation cycles")?;
        let instruments_evaluated_total = IntCounter::new(
            "instruments_evaluated_total",
            "Instruments whose indicators were computed",
        )?;
        let signals_fired_total =
            IntCounter::new("signals_fired_total", "Signals that passed the re-arm gate")?;
        let fetch_failures_total =
            IntCounter::new("fetch_failures_total", "Failed market data fetches")?;
        let notify_failures_total =
            IntCounter::new("notify_failures_total", "Failed notification deliveries")?;
        let cycle_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "cycle_duration_seconds",
            "Wall time of one evaluation cycle",
        ))?;

        registry.register(Box::new(cycles_total.clone()))?;
        registry.register(Box::new(instruments_evaluated_total.clone()))?;
        registry.register(Box::new(signals_fired_total.clone()))?;
        registry.register(Box::new(fetch_failures_total.clone()))?;
        registry.register(Box::new(notify_failures_total.clone()))?;
        registry.register(Box::new(cycle_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            cycles_total,
            instruments_evaluated_total,
            signals_fired_total,
            fetch_failures_total,
            notify_failures_total,
            cycle_duration_seconds,
        })
    }

    /// Render all metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
