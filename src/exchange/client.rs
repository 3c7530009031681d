//! Binance spot REST client
//!
//! Plain request/response calls against a single configured base URL.
//! Each request is bounded by the client-level timeout; nothing is retried.

use super::{
    BestQuote, MarketDataError, MarketDataSource, OrderBookDepth, TickerSnapshot, TickerStats,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Binance REST API base URL
pub const BINANCE_API_URL: &str = "https://api.binance.com/api";

/// Configuration for the REST client
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL, without a trailing `/v3`
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: BINANCE_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the Binance spot market-data endpoints
pub struct BinanceRestClient {
    config: RestConfig,
    client: Client,
}

impl BinanceRestClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(RestConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: RestConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Configured base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// GET a JSON endpoint and decode the body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MarketDataError> {
        let url = self.endpoint(path);

        tracing::debug!(url = %url, ?query, "Requesting Binance endpoint");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                url = %url,
                status = status.as_u16(),
                body = %preview(&body),
                "Binance API returned an error status"
            );
            return Err(MarketDataError::Api {
                status: status.as_u16(),
                body,
            });
        }

        decode_body(status.as_u16(), &body)
    }
}

impl Default for BinanceRestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataSource for BinanceRestClient {
    async fn ping(&self) -> Result<(), MarketDataError> {
        let url = self.endpoint("/v3/ping");

        match self.client.get(&url).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                tracing::debug!(url = %url, "Binance API reachable");
                Ok(())
            }
            Ok(response) => Err(MarketDataError::Unreachable(format!(
                "health check returned {}",
                response.status()
            ))),
            Err(e) => Err(MarketDataError::Unreachable(e.to_string())),
        }
    }

    async fn fetch_24h_ticker(&self) -> Result<TickerSnapshot, MarketDataError> {
        let entries: Vec<TickerStats> = self.get_json("/v3/ticker/24hr", &[]).await?;

        tracing::debug!(symbols = entries.len(), "Fetched 24h ticker snapshot");

        Ok(TickerSnapshot::new(entries))
    }

    async fn fetch_order_book(
        &self,
        symbol: &str,
        depth_limit: u32,
    ) -> Result<OrderBookDepth, MarketDataError> {
        self.get_json(
            "/v3/depth",
            &[
                ("symbol", symbol.to_string()),
                ("limit", depth_limit.to_string()),
            ],
        )
        .await
    }

    async fn fetch_best_quote(&self, symbol: &str) -> Result<BestQuote, MarketDataError> {
        self.get_json("/v3/ticker/bookTicker", &[("symbol", symbol.to_string())])
            .await
    }
}

/// Decode a success body, mapping decoder failures to an API error
fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, MarketDataError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(error = %e, body = %preview(body), "Malformed Binance response");
        MarketDataError::Api {
            status,
            body: format!("{}: {}", e, body),
        }
    })
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
