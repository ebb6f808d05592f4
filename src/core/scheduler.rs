//! Cron-based scheduler driving evaluation cycles

use crate::core::http::HealthStatus;
use crate::core::runtime::{run_cycle, CycleContext};
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Error, PartialEq)]
pub enum SchedulerError {
    #[error("scheduler disabled: interval_seconds is 0")]
    Disabled,

    #[error("interval of {0}s cannot be expressed as a cron schedule")]
    UnsupportedInterval(u64),

    #[error("invalid cron expression '{expr}': {reason}")]
    InvalidCron { expr: String, reason: String },
}

/// Convert an interval to a six-field cron expression (second minute hour day month weekday).
///
/// A `*/N` step restarts at every minute, hour or day boundary, so only
/// intervals that divide that boundary evenly keep a fixed period: 300s
/// becomes `0 */5 * * * *`, while 420s is rejected.
pub fn interval_to_cron(interval_seconds: u64) -> Result<String, SchedulerError> {
    match interval_seconds {
        0 => Err(SchedulerError::Disabled),
        s if s < 60 && 60 % s == 0 => Ok(format!("*/{} * * * * *", s)),
        s if s % 60 == 0 && s / 60 < 60 && 60 % (s / 60) == 0 => {
            Ok(format!("0 */{} * * * *", s / 60))
        }
        s if s % 3600 == 0 && s / 3600 < 24 && 24 % (s / 3600) == 0 => {
            Ok(format!("0 0 */{} * * *", s / 3600))
        }
        s => Err(SchedulerError::UnsupportedInterval(s)),
    }
}

/// Runs one cycle immediately and then one per schedule tick.
///
/// Cycles run inline on the scheduler task, so two cycles never overlap.
/// Ticks that pass while a cycle is still running are skipped, not queued.
pub struct CycleScheduler {
    context: Arc<CycleContext>,
    schedule: Schedule,
    health: Option<Arc<RwLock<HealthStatus>>>,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl CycleScheduler {
    pub fn new(context: Arc<CycleContext>, interval_seconds: u64) -> Result<Self, SchedulerError> {
        let cron_expr = interval_to_cron(interval_seconds)?;
        let schedule = Schedule::from_str(&cron_expr).map_err(|e| SchedulerError::InvalidCron {
            expr: cron_expr.clone(),
            reason: e.to_string(),
        })?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            symbols = ?context.config.symbols,
            "CycleScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            context,
            schedule,
            health: None,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Publish the outcome of every cycle to the `/health` status.
    pub fn with_health(mut self, health: Arc<RwLock<HealthStatus>>) -> Self {
        self.health = Some(health);
        self
    }

    pub async fn start(&self) {
        let context = self.context.clone();
        let schedule = self.schedule.clone();
        let health = self.health.clone();

        let handle = tokio::spawn(async move {
            info!("CycleScheduler: running initial cycle");
            run_and_report(&context, health.as_deref()).await;

            loop {
                let next_tick = match schedule.upcoming(chrono::Utc).next() {
                    Some(tick) => tick,
                    None => {
                        tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                        continue;
                    }
                };
                let wait = (next_tick - chrono::Utc::now()).to_std().unwrap_or_default();
                debug!(next = %next_tick, "CycleScheduler: sleeping until next tick");
                tokio::time::sleep(wait).await;

                run_and_report(&context, health.as_deref()).await;
            }
        });

        *self.handle.write().await = Some(handle);
        info!("CycleScheduler: started");
    }

    pub async fn stop(&self) {
        if let Some(h) = self.handle.write().await.take() {
            h.abort();
            info!("CycleScheduler: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle
            .read()
            .await
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

async fn run_and_report(context: &CycleContext, health: Option<&RwLock<HealthStatus>>) {
    let report = run_cycle(context).await;
    let Some(health) = health else {
        return;
    };

    let status = HealthStatus::from_report(&report);
    if report.all_failed() {
        warn!(
            failures = report.failures(),
            "CycleScheduler: every instrument failed to fetch, reporting degraded"
        );
    }
    *health.write().await = status;
}
