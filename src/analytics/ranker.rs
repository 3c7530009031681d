//! Top-N symbol selection from a 24h ticker snapshot

use crate::exchange::TickerSnapshot;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Default number of symbols kept by a ranking
pub const DEFAULT_RANK_LIMIT: usize = 5;

/// How a symbol is matched against a quote asset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteMatch {
    /// Quote asset appears anywhere in the symbol ("XBTCY" matches "BTC")
    #[default]
    Contains,
    /// Symbol ends with the quote asset and has a non-empty base
    Suffix,
}

impl QuoteMatch {
    pub fn matches(&self, symbol: &str, quote_asset: &str) -> bool {
        match self {
            QuoteMatch::Contains => symbol.contains(quote_asset),
            QuoteMatch::Suffix => {
                symbol.len() > quote_asset.len() && symbol.ends_with(quote_asset)
            }
        }
    }
}

/// A ranked symbol together with the value it was ranked by
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedSymbol {
    pub symbol: String,
    pub value: Decimal,
}

/// Ordered set of symbols produced by a ranking, best first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolSet {
    symbols: Vec<String>,
}

impl SymbolSet {
    pub fn new(symbols: Vec<String>) -> Self {
        Self { symbols }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.symbols
    }
}

impl FromIterator<String> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(str::to_string).collect())
    }
}

/// Ranks ticker entries by a numeric field
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolRanker {
    matching: QuoteMatch,
}

impl SymbolRanker {
    /// Create a ranker using substring matching
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ranker with an explicit matching strategy
    pub fn with_matching(matching: QuoteMatch) -> Self {
        Self { matching }
    }

    /// Select the top `limit` symbols quoted in `quote_asset` by `field`
    pub fn rank(
        &self,
        snapshot: &TickerSnapshot,
        quote_asset: &str,
        field: &str,
        limit: usize,
    ) -> SymbolSet {
        self.rank_with_values(snapshot, quote_asset, field, limit)
            .into_iter()
            .map(|r| r.symbol)
            .collect()
    }

    /// Same as [`rank`](Self::rank) but keeps the ranking values
    ///
    /// Entries whose field is missing or non-numeric are excluded. The sort
    /// is stable, so ties keep their snapshot order.
    pub fn rank_with_values(
        &self,
        snapshot: &TickerSnapshot,
        quote_asset: &str,
        field: &str,
        limit: usize,
    ) -> Vec<RankedSymbol> {
        let mut ranked: Vec<RankedSymbol> = snapshot
            .iter()
            .filter(|stats| self.matching.matches(&stats.symbol, quote_asset))
            .filter_map(|stats| {
                let value = stats.field(field).and_then(coerce_numeric)?;
                Some(RankedSymbol {
                    symbol: stats.symbol.clone(),
                    value,
                })
            })
            .collect();

        ranked.sort_by(|a, b| b.value.cmp(&a.value));
        ranked.truncate(limit);

        tracing::debug!(
            quote_asset,
            field,
            selected = ranked.len(),
            "Ranked ticker snapshot"
        );

        ranked
    }
}

/// Coerce a JSON value to a decimal; `None` means "not numeric"
pub fn coerce_numeric(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
