//! Prometheus gauge registry
//!
//! The publisher owns its own recorder instead of installing the global
//! one, so every instance (and every test) has an isolated registry.
//! Gauge writes are atomic stores; scrapes read a consistent value per
//! series without blocking the sampling loop.

use crate::sampling::SpreadDelta;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};
use rust_decimal::prelude::ToPrimitive;
use std::net::SocketAddr;
use tokio::task::JoinHandle;

/// Gauge name exposed to scrapers
pub const ABSOLUTE_DELTA_METRIC: &str = "absolute_delta_value";

/// Help text of the gauge
pub const ABSOLUTE_DELTA_HELP: &str = "Absolute Delta Value of Price Spread";

/// Label carrying the trading symbol
pub const SYMBOL_LABEL: &str = "symbol";

/// Per-symbol gauges for the absolute spread delta
pub struct MetricsPublisher {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
}

impl MetricsPublisher {
    /// Create a publisher without an HTTP listener
    pub fn new() -> Self {
        Self::from_recorder(PrometheusBuilder::new().build_recorder())
    }

    /// Create a publisher and spawn its scrape listener on `addr`
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_http_listener(addr: SocketAddr) -> anyhow::Result<(Self, JoinHandle<()>)> {
        let (recorder, exporter) = PrometheusBuilder::new()
            .with_http_listener(addr)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to start metrics listener on {}: {}", addr, e))?;

        let server = tokio::spawn(async move {
            if let Err(e) = exporter.await {
                tracing::error!(error = ?e, "Metrics listener stopped");
            }
        });

        tracing::info!(%addr, "Serving metrics at /metrics");

        Ok((Self::from_recorder(recorder), server))
    }

    fn from_recorder(recorder: PrometheusRecorder) -> Self {
        let handle = recorder.handle();

        ::metrics::with_local_recorder(&recorder, || {
            ::metrics::describe_gauge!(ABSOLUTE_DELTA_METRIC, ABSOLUTE_DELTA_HELP);
        });

        Self { recorder, handle }
    }

    /// Set the gauge for `symbol`, creating it on first observation
    pub fn observe(&self, symbol: &str, value: f64) {
        ::metrics::with_local_recorder(&self.recorder, || {
            ::metrics::gauge!(ABSOLUTE_DELTA_METRIC, SYMBOL_LABEL => symbol.to_string()).set(value);
        });
    }

    /// Publish every symbol of a delta
    pub fn observe_all(&self, delta: &SpreadDelta) {
        for (symbol, value) in &delta.values {
            self.observe(symbol, value.to_f64().unwrap_or_default());
        }
    }

    /// Current value of a symbol's gauge as a scraper would read it
    pub fn value(&self, symbol: &str) -> Option<f64> {
        let prefix = format!(
            "{}{{{}=\"{}\"}} ",
            ABSOLUTE_DELTA_METRIC, SYMBOL_LABEL, symbol
        );

        self.render()
            .lines()
            .find_map(|line| line.strip_prefix(prefix.as_str()))
            .and_then(|v| v.trim().parse().ok())
    }

    /// Prometheus text exposition of every gauge
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

impl Default for MetricsPublisher {
    fn default() -> Self {
        Self::new()
    }
}
