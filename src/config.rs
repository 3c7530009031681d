//! Configuration types for spread-watch

use crate::analytics::{
    QuoteMatch, DEFAULT_DEPTH_LIMIT, DEFAULT_NOTIONAL_LEVELS, DEFAULT_RANK_LIMIT,
};
use crate::exchange::{RestConfig, BINANCE_API_URL};
use crate::sampling::{DeltaMode, FailurePolicy, SchedulerConfig};
use crate::telemetry::LogFormat;
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub notional: NotionalConfig,
    #[serde(default)]
    pub sampler: SamplerConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Exchange REST configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    BINANCE_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ExchangeConfig {
    pub fn rest_config(&self) -> RestConfig {
        RestConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Symbol ranking configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    /// Number of symbols kept per ranking
    #[serde(default = "default_rank_limit")]
    pub limit: usize,
    /// Quote-asset matching strategy
    #[serde(default)]
    pub quote_match: QuoteMatch,
}

fn default_rank_limit() -> usize {
    DEFAULT_RANK_LIMIT
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RANK_LIMIT,
            quote_match: QuoteMatch::default(),
        }
    }
}

/// Order-book notional configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotionalConfig {
    /// Depth requested per symbol
    #[serde(default = "default_depth_limit")]
    pub depth_limit: u32,
    /// Levels summed per side
    #[serde(default = "default_levels")]
    pub levels: usize,
}

fn default_depth_limit() -> u32 {
    DEFAULT_DEPTH_LIMIT
}
fn default_levels() -> usize {
    DEFAULT_NOTIONAL_LEVELS
}

impl Default for NotionalConfig {
    fn default() -> Self {
        Self {
            depth_limit: DEFAULT_DEPTH_LIMIT,
            levels: DEFAULT_NOTIONAL_LEVELS,
        }
    }
}

/// Spread delta loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SamplerConfig {
    #[serde(default = "default_loop_asset")]
    pub asset: String,
    #[serde(default = "default_loop_field")]
    pub field: String,
    /// Seconds between the two samples of a cycle and between cycles
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default)]
    pub mode: DeltaMode,
    #[serde(default)]
    pub on_error: FailurePolicy,
    /// Print each delta to stdout
    #[serde(default = "default_true")]
    pub echo: bool,
}

fn default_loop_asset() -> String {
    "USDT".to_string()
}
fn default_loop_field() -> String {
    "count".to_string()
}
fn default_interval_secs() -> u64 {
    10
}
fn default_true() -> bool {
    true
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            asset: default_loop_asset(),
            field: default_loop_field(),
            interval_secs: default_interval_secs(),
            mode: DeltaMode::default(),
            on_error: FailurePolicy::default(),
            echo: true,
        }
    }
}

impl SamplerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            asset: self.asset.clone(),
            field: self.field.clone(),
            interval: self.interval(),
            on_error: self.on_error,
            max_cycles: None,
            echo: self.echo,
        }
    }
}

/// A (quote asset, ranking field) pair
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SymbolQuery {
    pub asset: String,
    pub field: String,
}

impl SymbolQuery {
    pub fn new(asset: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            field: field.into(),
        }
    }
}

/// One-shot startup reports
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    #[serde(default = "default_top_queries")]
    pub top: Vec<SymbolQuery>,
    #[serde(default = "default_notional_queries")]
    pub notional: Vec<SymbolQuery>,
    #[serde(default = "default_spread_queries")]
    pub spread: Vec<SymbolQuery>,
}

fn default_top_queries() -> Vec<SymbolQuery> {
    vec![
        SymbolQuery::new("BTC", "volume"),
        SymbolQuery::new("USDT", "count"),
    ]
}
fn default_notional_queries() -> Vec<SymbolQuery> {
    vec![SymbolQuery::new("BTC", "volume")]
}
fn default_spread_queries() -> Vec<SymbolQuery> {
    vec![SymbolQuery::new("USDT", "count")]
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            top: default_top_queries(),
            notional: default_notional_queries(),
            spread: default_spread_queries(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Port of the `/metrics` scrape endpoint
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_metrics_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_port: default_metrics_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
