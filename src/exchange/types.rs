//! Wire types for the Binance spot REST API

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 24h rolling statistics for one symbol
///
/// Only `symbol` is typed; every other field (`volume`, `quoteVolume`,
/// `count`, ...) is kept verbatim so callers can rank by any field name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerStats {
    /// Trading symbol (e.g., "BTCUSDT")
    pub symbol: String,
    /// Remaining fields as returned by the exchange
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TickerStats {
    /// Create stats with no extra fields
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style field setter, mostly for fixtures
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Raw value of a field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// One point-in-time response of the 24h ticker endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerSnapshot {
    /// Entries in the order the exchange returned them
    pub entries: Vec<TickerStats>,
    /// Local time the snapshot was received
    pub fetched_at: DateTime<Utc>,
}

impl TickerSnapshot {
    /// Wrap entries fetched now
    pub fn new(entries: Vec<TickerStats>) -> Self {
        Self {
            entries,
            fetched_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TickerStats> {
        self.entries.iter()
    }
}

/// A price level in the order book, decoded from a `[price, quantity]` row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Decimal, Decimal)")]
pub struct OrderBookLevel {
    /// Price at this level
    pub price: Decimal,
    /// Quantity resting at this level
    pub quantity: Decimal,
}

impl OrderBookLevel {
    pub fn new(price: Decimal, quantity: Decimal) -> Self {
        Self { price, quantity }
    }

    /// price × quantity, `None` when the product overflows
    pub fn notional(&self) -> Option<Decimal> {
        self.price.checked_mul(self.quantity)
    }
}

impl From<(Decimal, Decimal)> for OrderBookLevel {
    fn from((price, quantity): (Decimal, Decimal)) -> Self {
        Self { price, quantity }
    }
}

/// Order-book depth snapshot from `/v3/depth`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookDepth {
    /// Exchange sequence number of the snapshot
    #[serde(default)]
    pub last_update_id: Option<u64>,
    /// Bid levels as returned (best first)
    #[serde(default)]
    pub bids: Vec<OrderBookLevel>,
    /// Ask levels as returned (best first)
    #[serde(default)]
    pub asks: Vec<OrderBookLevel>,
}

/// Best bid/ask from `/v3/ticker/bookTicker`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestQuote {
    #[serde(default)]
    pub symbol: String,
    /// Best bid price
    #[serde(rename = "bidPrice")]
    pub bid: Decimal,
    /// Best ask price
    #[serde(rename = "askPrice")]
    pub ask: Decimal,
}

impl BestQuote {
    pub fn new(symbol: impl Into<String>, bid: Decimal, ask: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            bid,
            ask,
        }
    }

    /// ask − bid, signed; an inverted feed yields a non-positive spread
    ///
    /// `None` when the difference overflows.
    pub fn spread(&self) -> Option<Decimal> {
        self.ask.checked_sub(self.bid)
    }
}
