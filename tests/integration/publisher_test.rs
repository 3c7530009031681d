//! Scrape endpoint tests

use spread_watch::telemetry::MetricsPublisher;
use std::net::SocketAddr;
use std::time::Duration;

#[tokio::test]
async fn test_metrics_endpoint_serves_gauges() {
    let addr: SocketAddr = "127.0.0.1:19187".parse().unwrap();
    let (publisher, server) = MetricsPublisher::with_http_listener(addr).unwrap();

    publisher.observe("BTCUSDT", 0.3);
    tokio::time::sleep(Duration::from_millis(100)).await;

    let body = reqwest::get(format!("http://{}/metrics", addr))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("# TYPE absolute_delta_value gauge"));
    assert!(body.contains("absolute_delta_value{symbol=\"BTCUSDT\"} 0.3"));

    publisher.observe("BTCUSDT", 0.7);
    let body = reqwest::get(format!("http://{}/metrics", addr))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("absolute_delta_value{symbol=\"BTCUSDT\"} 0.7"));

    server.abort();
}
