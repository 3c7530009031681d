//! Exchange market-data module
//!
//! Read-only access to the Binance spot REST API: health check, 24h ticker
//! statistics, order-book depth and best bid/ask.

mod client;
mod error;
mod types;

#[cfg(test)]
pub(crate) mod fixture;

pub use client::{BinanceRestClient, RestConfig, BINANCE_API_URL};
pub use error::MarketDataError;
pub use types::{BestQuote, OrderBookDepth, OrderBookLevel, TickerSnapshot, TickerStats};

use async_trait::async_trait;

/// Trait for market-data source implementations
///
/// None of the calls retry internally; retry policy belongs to the caller.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Health check against the exchange
    async fn ping(&self) -> Result<(), MarketDataError>;
    /// Fetch 24h rolling statistics for every symbol
    async fn fetch_24h_ticker(&self) -> Result<TickerSnapshot, MarketDataError>;
    /// Fetch order-book depth for a symbol (the server may return fewer levels)
    async fn fetch_order_book(
        &self,
        symbol: &str,
        depth_limit: u32,
    ) -> Result<OrderBookDepth, MarketDataError>;
    /// Fetch the best bid/ask for a symbol
    async fn fetch_best_quote(&self, symbol: &str) -> Result<BestQuote, MarketDataError>;
}
