//! Fixed-interval delta loop
//!
//! Strictly serial: a cycle starts only after the previous cycle's samples
//! and delta are complete. The loop stops on shutdown, after `max_cycles`,
//! or on the first error under [`FailurePolicy::Abort`].

use super::{DeltaEngine, SpreadDelta};
use crate::exchange::{MarketDataError, MarketDataSource};
use crate::report;
use crate::telemetry::MetricsPublisher;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// What the loop does when a cycle fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Return the error and stop the loop
    #[default]
    Abort,
    /// Log, keep the last published gauges and try again next interval
    SkipCycle,
}

/// Scheduler settings
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub asset: String,
    pub field: String,
    /// Wait between cycles
    pub interval: Duration,
    pub on_error: FailurePolicy,
    /// Stop after this many attempted cycles (None = run until shutdown)
    pub max_cycles: Option<u64>,
    /// Print each delta to stdout
    pub echo: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            asset: "USDT".to_string(),
            field: "count".to_string(),
            interval: Duration::from_secs(10),
            on_error: FailurePolicy::Abort,
            max_cycles: None,
            echo: false,
        }
    }
}

/// Counters returned when the loop exits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Cycles that published a delta
    pub cycles: u64,
    /// Cycles skipped after an error
    pub failures: u64,
}

impl SchedulerStats {
    fn attempted(&self) -> u64 {
        self.cycles + self.failures
    }
}

/// Trigger side of the shutdown channel
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

/// Receive side of the shutdown channel
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown is triggered; never resolves if the handle is dropped untriggered
    pub async fn wait(&mut self) {
        while !*self.rx.borrow_and_update() {
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Create a linked shutdown handle and signal
pub fn shutdown_channel() -> (ShutdownHandle, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx: Arc::new(tx) }, ShutdownSignal { rx })
}

/// Drives the delta engine and publishes every delta
pub struct Scheduler<S: MarketDataSource> {
    engine: DeltaEngine<S>,
    publisher: Arc<MetricsPublisher>,
    config: SchedulerConfig,
}

impl<S: MarketDataSource> Scheduler<S> {
    pub fn new(
        engine: DeltaEngine<S>,
        publisher: Arc<MetricsPublisher>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            engine,
            publisher,
            config,
        }
    }

    /// Run until shutdown, `max_cycles`, or an aborting error
    pub async fn run(
        &mut self,
        mut shutdown: ShutdownSignal,
    ) -> Result<SchedulerStats, MarketDataError> {
        let mut stats = SchedulerStats::default();

        tracing::info!(
            asset = %self.config.asset,
            field = %self.config.field,
            interval_ms = self.config.interval.as_millis() as u64,
            mode = ?self.engine.mode(),
            on_error = ?self.config.on_error,
            "Starting spread delta loop"
        );

        loop {
            if shutdown.is_triggered() || self.cycle_budget_spent(&stats) {
                break;
            }

            let outcome = tokio::select! {
                result = self.engine.delta(&self.config.asset, &self.config.field) => Some(result),
                _ = shutdown.wait() => None,
            };

            match outcome {
                None => break,
                Some(Ok(delta)) => {
                    self.publish(&delta);
                    stats.cycles += 1;
                }
                Some(Err(e)) => match self.config.on_error {
                    FailurePolicy::Abort => {
                        tracing::error!(
                            error = %e,
                            cycle = stats.attempted() + 1,
                            "Delta cycle failed"
                        );
                        return Err(e);
                    }
                    FailurePolicy::SkipCycle => {
                        stats.failures += 1;
                        tracing::warn!(
                            error = %e,
                            failures = stats.failures,
                            "Delta cycle failed, keeping last published values"
                        );
                    }
                },
            }

            if self.cycle_budget_spent(&stats) {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                _ = shutdown.wait() => break,
            }
        }

        tracing::info!(
            cycles = stats.cycles,
            failures = stats.failures,
            "Spread delta loop stopped"
        );

        Ok(stats)
    }

    fn cycle_budget_spent(&self, stats: &SchedulerStats) -> bool {
        self.config
            .max_cycles
            .is_some_and(|max| stats.attempted() >= max)
    }

    fn publish(&self, delta: &SpreadDelta) {
        self.publisher.observe_all(delta);

        for (symbol, value) in &delta.values {
            tracing::info!(symbol = %symbol, delta = %value, "Absolute spread delta");
        }

        if self.config.echo {
            println!("{}", report::render_delta(delta));
        }
    }
}
