//! Shared fixtures for integration tests

use async_trait::async_trait;
use rust_decimal::Decimal;
use spread_watch::exchange::{
    BestQuote, MarketDataError, MarketDataSource, OrderBookDepth, TickerSnapshot, TickerStats,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// In-memory exchange; quotes are served in order and the last one repeats
pub struct MockExchange {
    pub reachable: bool,
    ticker: Vec<TickerStats>,
    books: HashMap<String, OrderBookDepth>,
    quotes: Mutex<HashMap<String, VecDeque<BestQuote>>>,
}

impl MockExchange {
    pub fn new(ticker: Vec<TickerStats>) -> Self {
        Self {
            reachable: true,
            ticker,
            books: HashMap::new(),
            quotes: Mutex::new(HashMap::new()),
        }
    }

    pub fn book(mut self, symbol: &str, book: OrderBookDepth) -> Self {
        self.books.insert(symbol.to_string(), book);
        self
    }

    /// Queue quotes as (bid, ask) pairs
    pub fn quotes(self, symbol: &str, pairs: &[(Decimal, Decimal)]) -> Self {
        let queue = pairs
            .iter()
            .map(|(bid, ask)| BestQuote::new(symbol, *bid, *ask))
            .collect();
        self.quotes
            .lock()
            .unwrap()
            .insert(symbol.to_string(), queue);
        self
    }
}

#[async_trait]
impl MarketDataSource for MockExchange {
    async fn ping(&self) -> Result<(), MarketDataError> {
        if self.reachable {
            Ok(())
        } else {
            Err(MarketDataError::Unreachable("mock exchange down".to_string()))
        }
    }

    async fn fetch_24h_ticker(&self) -> Result<TickerSnapshot, MarketDataError> {
        Ok(TickerSnapshot::new(self.ticker.clone()))
    }

    async fn fetch_order_book(
        &self,
        symbol: &str,
        _depth_limit: u32,
    ) -> Result<OrderBookDepth, MarketDataError> {
        Ok(self.books.get(symbol).cloned().unwrap_or_default())
    }

    async fn fetch_best_quote(&self, symbol: &str) -> Result<BestQuote, MarketDataError> {
        let mut quotes = self.quotes.lock().unwrap();
        let missing = || MarketDataError::Api {
            status: 400,
            body: format!("{{\"code\":-1121,\"msg\":\"Invalid symbol {}\"}}", symbol),
        };

        let queue = quotes.get_mut(symbol).ok_or_else(missing)?;
        if queue.len() > 1 {
            queue.pop_front().ok_or_else(missing)
        } else {
            queue.front().cloned().ok_or_else(missing)
        }
    }
}

/// Ticker entry with string volume and integer trade count, as Binance sends them
pub fn ticker(symbol: &str, volume: &str, count: u64) -> TickerStats {
    TickerStats::new(symbol)
        .with_field("volume", volume)
        .with_field("count", count)
}
