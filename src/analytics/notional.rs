//! Order-book notional value aggregation

use super::SymbolSet;
use crate::exchange::{MarketDataError, MarketDataSource, OrderBookLevel};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Depth requested from the exchange per symbol
pub const DEFAULT_DEPTH_LIMIT: u32 = 500;

/// Levels summed per side
pub const DEFAULT_NOTIONAL_LEVELS: usize = 200;

/// Order-book side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookSide {
    Bids,
    Asks,
}

impl BookSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookSide::Bids => "bids",
            BookSide::Asks => "asks",
        }
    }

    /// Result key for a symbol on this side, e.g. "BTCUSDT_asks"
    pub fn key(&self, symbol: &str) -> String {
        format!("{}_{}", symbol, self.as_str())
    }
}

impl fmt::Display for BookSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notional value per "{symbol}_{side}"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotionalResult {
    values: BTreeMap<String, Decimal>,
}

impl NotionalResult {
    pub fn get(&self, symbol: &str, side: BookSide) -> Option<Decimal> {
        self.values.get(&side.key(symbol)).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Sum over every key
    pub fn total(&self) -> Decimal {
        self.values.values().copied().sum()
    }

    fn insert(&mut self, symbol: &str, side: BookSide, value: Decimal) {
        self.values.insert(side.key(symbol), value);
    }
}

/// Sum of price × quantity over the `take` highest-priced levels
///
/// Both sides are ranked by price descending. For asks this deliberately
/// selects the highest-priced levels rather than the best ones.
///
/// Returns the level at which the product or running sum left the
/// `Decimal` range.
pub fn side_notional(levels: &[OrderBookLevel], take: usize) -> Result<Decimal, OrderBookLevel> {
    let mut sorted: Vec<&OrderBookLevel> = levels.iter().collect();
    sorted.sort_by(|a, b| b.price.cmp(&a.price));

    sorted
        .into_iter()
        .take(take)
        .try_fold(Decimal::ZERO, |total, level| {
            level
                .notional()
                .and_then(|value| total.checked_add(value))
                .ok_or(*level)
        })
}

fn overflow_error(symbol: &str, side: BookSide, level: OrderBookLevel) -> MarketDataError {
    tracing::warn!(
        symbol,
        %side,
        price = %level.price,
        quantity = %level.quantity,
        "Order-book notional out of range"
    );
    let key = side.key(symbol);
    MarketDataError::Api {
        status: 200,
        body: format!("notional overflow for {key} at [{}, {}]", level.price, level.quantity),
    }
}

/// Computes notional value of the top levels of each order book
pub struct NotionalAggregator<S: MarketDataSource> {
    source: Arc<S>,
    depth_limit: u32,
    levels: usize,
}

impl<S: MarketDataSource> NotionalAggregator<S> {
    /// Create an aggregator with the default depth and level count
    pub fn new(source: Arc<S>) -> Self {
        Self::with_depth(source, DEFAULT_DEPTH_LIMIT, DEFAULT_NOTIONAL_LEVELS)
    }

    /// Create an aggregator with explicit depth request and level count
    pub fn with_depth(source: Arc<S>, depth_limit: u32, levels: usize) -> Self {
        Self {
            source,
            depth_limit,
            levels,
        }
    }

    /// Aggregate bids and asks for every symbol
    ///
    /// One failed fetch or out-of-range book aborts the whole aggregation.
    pub async fn aggregate(
        &self,
        symbols: &SymbolSet,
    ) -> Result<NotionalResult, MarketDataError> {
        let mut result = NotionalResult::default();

        for symbol in symbols.iter() {
            let book = self
                .source
                .fetch_order_book(symbol, self.depth_limit)
                .await?;

            let bids = side_notional(&book.bids, self.levels)
                .map_err(|level| overflow_error(symbol, BookSide::Bids, level))?;
            let asks = side_notional(&book.asks, self.levels)
                .map_err(|level| overflow_error(symbol, BookSide::Asks, level))?;

            tracing::debug!(
                symbol,
                bid_levels = book.bids.len(),
                ask_levels = book.asks.len(),
                %bids,
                %asks,
                "Computed order-book notional"
            );

            result.insert(symbol, BookSide::Bids, bids);
            result.insert(symbol, BookSide::Asks, asks);
        }

        Ok(result)
    }
}
