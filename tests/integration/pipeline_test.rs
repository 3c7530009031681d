//! End-to-end pipeline scenarios against an in-memory exchange

use crate::support::{ticker, MockExchange};
use rust_decimal_macros::dec;
use spread_watch::analytics::{
    BookSide, NotionalAggregator, SpreadSampler, SymbolRanker, SymbolSet, DEFAULT_RANK_LIMIT,
};
use spread_watch::cli::{run_pipeline, Reporter, RunOptions};
use spread_watch::config::Config;
use spread_watch::exchange::{MarketDataSource, OrderBookDepth, OrderBookLevel};
use spread_watch::sampling::{shutdown_channel, DeltaEngine};
use spread_watch::telemetry::MetricsPublisher;
use std::sync::Arc;
use std::time::Duration;

fn exchange() -> MockExchange {
    MockExchange::new(vec![
        ticker("BTCUSDT", "100", 9000),
        ticker("ETHBTC", "50", 100),
        ticker("ETHUSDT", "75", 4000),
    ])
}

fn fast_config() -> Config {
    let mut config: Config = toml::from_str("").unwrap();
    config.sampler.interval_secs = 0;
    config.sampler.echo = false;
    config
}

#[tokio::test]
async fn test_rank_btc_by_volume() {
    let source = exchange();
    let snapshot = source.fetch_24h_ticker().await.unwrap();

    let set = SymbolRanker::new().rank(&snapshot, "BTC", "volume", DEFAULT_RANK_LIMIT);
    assert_eq!(set.as_slice(), &["BTCUSDT", "ETHBTC"]);
}

#[tokio::test]
async fn test_notional_top_two_asks() {
    let source = exchange().book(
        "BTCUSDT",
        OrderBookDepth {
            last_update_id: Some(1),
            bids: vec![],
            asks: vec![
                OrderBookLevel::new(dec!(10), dec!(1)),
                OrderBookLevel::new(dec!(9), dec!(2)),
                OrderBookLevel::new(dec!(8), dec!(100)),
            ],
        },
    );

    let aggregator = NotionalAggregator::with_depth(Arc::new(source), 500, 2);
    let symbols: SymbolSet = ["BTCUSDT"].into_iter().collect();
    let result = aggregator.aggregate(&symbols).await.unwrap();

    assert_eq!(result.get("BTCUSDT", BookSide::Asks), Some(dec!(28)));
    assert_eq!(result.get("BTCUSDT", BookSide::Bids), Some(dec!(0)));
}

#[tokio::test]
async fn test_spread_delta_between_ticks() {
    let source = Arc::new(
        exchange()
            .quotes("BTCUSDT", &[(dec!(100), dec!(101.5)), (dec!(100), dec!(101.2))])
            .quotes("ETHUSDT", &[(dec!(10), dec!(10.1))]),
    );

    let mut engine = DeltaEngine::new(SpreadSampler::new(source), Duration::from_millis(1));
    let delta = engine.delta("USDT", "count").await.unwrap();

    assert_eq!(delta.get("BTCUSDT"), Some(dec!(0.3)));
    assert_eq!(delta.get("ETHUSDT"), Some(dec!(0)));
    assert!(delta.get("ETHBTC").is_none());
}

#[tokio::test]
async fn test_reporter_startup_reports() {
    let source = Arc::new(
        exchange()
            .quotes("BTCUSDT", &[(dec!(100), dec!(100.5))])
            .quotes("ETHUSDT", &[(dec!(10), dec!(10.1))]),
    );

    let reporter = Reporter::new(source, &fast_config());
    let reports = reporter
        .startup_reports(&fast_config().reports)
        .await
        .unwrap();

    assert_eq!(reports.len(), 4);
    assert!(reports[0].starts_with("Top symbols for BTC by volume"));
    assert!(reports[1].starts_with("Top symbols for USDT by count"));
    assert!(reports[2].contains("ETHBTC_asks"));
    assert!(reports[3].contains("BTCUSDT") && reports[3].contains("0.5"));
}

#[tokio::test]
async fn test_run_pipeline_publishes_deltas() {
    let source = Arc::new(
        exchange()
            .quotes("BTCUSDT", &[(dec!(100), dec!(101.5)), (dec!(100), dec!(101.2))])
            .quotes("ETHUSDT", &[(dec!(10), dec!(10.25))]),
    );
    let publisher = Arc::new(MetricsPublisher::new());
    let (_handle, signal) = shutdown_channel();

    let options = RunOptions {
        max_cycles: Some(1),
        no_reports: true,
        ..Default::default()
    };

    let stats = run_pipeline(source, publisher.clone(), &fast_config(), &options, signal)
        .await
        .unwrap();

    assert_eq!(stats.cycles, 1);
    assert_eq!(publisher.value("BTCUSDT"), Some(0.3));
    assert_eq!(publisher.value("ETHUSDT"), Some(0.0));
    assert!(publisher.value("ETHBTC").is_none());
}

#[tokio::test]
async fn test_run_pipeline_aborts_when_unreachable() {
    let mut source = exchange();
    source.reachable = false;

    let publisher = Arc::new(MetricsPublisher::new());
    let (_handle, signal) = shutdown_channel();

    let err = run_pipeline(
        Arc::new(source),
        publisher.clone(),
        &fast_config(),
        &RunOptions::default(),
        signal,
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("unreachable"));
    assert!(publisher.value("BTCUSDT").is_none());
}

#[tokio::test]
async fn test_run_pipeline_skip_failures_keeps_last_values() {
    // ETHUSDT has no quotes, so every sample fails
    let source = Arc::new(exchange().quotes("BTCUSDT", &[(dec!(1), dec!(2))]));
    let publisher = Arc::new(MetricsPublisher::new());
    publisher.observe("BTCUSDT", 0.42);
    let (_handle, signal) = shutdown_channel();

    let options = RunOptions {
        max_cycles: Some(2),
        skip_failures: true,
        no_reports: true,
    };

    let stats = run_pipeline(source, publisher.clone(), &fast_config(), &options, signal)
        .await
        .unwrap();

    assert_eq!(stats.cycles, 0);
    assert_eq!(stats.failures, 2);
    assert_eq!(publisher.value("BTCUSDT"), Some(0.42));
}
