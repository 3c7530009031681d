//! In-memory market-data source for unit tests

use super::{
    BestQuote, MarketDataError, MarketDataSource, OrderBookDepth, TickerSnapshot, TickerStats,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

/// Scripted source: quotes are served front-to-back, the last one repeats
#[derive(Default)]
pub(crate) struct FixtureSource {
    pub reachable: bool,
    ticker: Mutex<Vec<TickerStats>>,
    books: Mutex<HashMap<String, OrderBookDepth>>,
    quotes: Mutex<HashMap<String, VecDeque<BestQuote>>>,
    failing: Mutex<HashSet<String>>,
    pub quote_calls: Mutex<usize>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self {
            reachable: true,
            ..Default::default()
        }
    }

    pub fn with_ticker(self, entries: Vec<TickerStats>) -> Self {
        *self.ticker.lock().unwrap() = entries;
        self
    }

    pub fn with_book(self, symbol: &str, book: OrderBookDepth) -> Self {
        self.books.lock().unwrap().insert(symbol.to_string(), book);
        self
    }

    /// Queue successive spreads for a symbol (bid fixed at 100)
    pub fn with_spreads(self, symbol: &str, spreads: &[Decimal]) -> Self {
        let quotes = spreads
            .iter()
            .map(|s| BestQuote::new(symbol, Decimal::ONE_HUNDRED, Decimal::ONE_HUNDRED + s))
            .collect();
        self.quotes
            .lock()
            .unwrap()
            .insert(symbol.to_string(), quotes);
        self
    }

    /// Serve one fixed quote for a symbol
    pub fn with_quote(self, symbol: &str, bid: Decimal, ask: Decimal) -> Self {
        self.quotes
            .lock()
            .unwrap()
            .insert(symbol.to_string(), VecDeque::from([BestQuote::new(symbol, bid, ask)]));
        self
    }

    pub fn fail_symbol(&self, symbol: &str) {
        self.failing.lock().unwrap().insert(symbol.to_string());
    }

    fn check(&self, symbol: &str) -> Result<(), MarketDataError> {
        if self.failing.lock().unwrap().contains(symbol) {
            return Err(MarketDataError::Api {
                status: 400,
                body: format!("{{\"code\":-1121,\"msg\":\"Invalid symbol {}\"}}", symbol),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MarketDataSource for FixtureSource {
    async fn ping(&self) -> Result<(), MarketDataError> {
        if self.reachable {
            Ok(())
        } else {
            Err(MarketDataError::Unreachable("fixture offline".to_string()))
        }
    }

    async fn fetch_24h_ticker(&self) -> Result<TickerSnapshot, MarketDataError> {
        Ok(TickerSnapshot::new(self.ticker.lock().unwrap().clone()))
    }

    async fn fetch_order_book(
        &self,
        symbol: &str,
        _depth_limit: u32,
    ) -> Result<OrderBookDepth, MarketDataError> {
        self.check(symbol)?;
        Ok(self
            .books
            .lock()
            .unwrap()
            .get(symbol)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_best_quote(&self, symbol: &str) -> Result<BestQuote, MarketDataError> {
        self.check(symbol)?;
        *self.quote_calls.lock().unwrap() += 1;

        let mut quotes = self.quotes.lock().unwrap();
        let queue = quotes.get_mut(symbol).ok_or_else(|| MarketDataError::Api {
            status: 400,
            body: format!("no quote for {}", symbol),
        })?;

        let quote = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };

        quote.ok_or_else(|| MarketDataError::Api {
            status: 400,
            body: format!("no quote for {}", symbol),
        })
    }
}
