//! spread-watch: Binance spread deltas as Prometheus gauges
//!
//! This library provides the core components for:
//! - Read-only access to the Binance spot REST API
//! - Top-symbol ranking over the 24h ticker
//! - Order-book notional value and bid/ask spread sampling
//! - Absolute spread deltas on a fixed interval
//! - A Prometheus gauge registry served at `/metrics`

pub mod analytics;
pub mod cli;
pub mod config;
pub mod exchange;
pub mod report;
pub mod sampling;
pub mod telemetry;
