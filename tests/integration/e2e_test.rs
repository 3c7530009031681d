//! Configuration round-trip for the shipped example

use spread_watch::config::Config;
use spread_watch::sampling::{DeltaMode, FailurePolicy};

#[test]
fn test_config_example_exists() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();

    assert_eq!(config.exchange.base_url, "https://api.binance.com/api");
    assert_eq!(config.sampler.asset, "USDT");
    assert_eq!(config.sampler.mode, DeltaMode::DoubleSample);
    assert_eq!(config.sampler.on_error, FailurePolicy::Abort);
    assert_eq!(config.reports.top.len(), 2);
    assert_eq!(config.telemetry.metrics_port, 8080);
}
