//! Bid/ask spread sampling

use super::{SymbolRanker, SymbolSet, DEFAULT_RANK_LIMIT};
use crate::exchange::{MarketDataError, MarketDataSource};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Spread (ask − bid) per symbol at one point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadSample {
    pub values: BTreeMap<String, Decimal>,
    pub taken_at: DateTime<Utc>,
}

impl SpreadSample {
    pub fn new(values: BTreeMap<String, Decimal>) -> Self {
        Self {
            values,
            taken_at: Utc::now(),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<Decimal> {
        self.values.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for SpreadSample {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(s, v)| (s.into(), v)).collect())
    }
}

/// Fetches best quotes and derives spreads
pub struct SpreadSampler<S: MarketDataSource> {
    source: Arc<S>,
    ranker: SymbolRanker,
    limit: usize,
}

impl<S: MarketDataSource> SpreadSampler<S> {
    /// Create a sampler ranking with substring matching and the default limit
    pub fn new(source: Arc<S>) -> Self {
        Self::with_ranker(source, SymbolRanker::new(), DEFAULT_RANK_LIMIT)
    }

    /// Create a sampler with an explicit ranker and rank limit
    pub fn with_ranker(source: Arc<S>, ranker: SymbolRanker, limit: usize) -> Self {
        Self {
            source,
            ranker,
            limit,
        }
    }

    /// Spread for every symbol in the set; one failed fetch aborts the sample
    pub async fn sample(&self, symbols: &SymbolSet) -> Result<SpreadSample, MarketDataError> {
        let mut values = BTreeMap::new();

        for symbol in symbols.iter() {
            let quote = self.source.fetch_best_quote(symbol).await?;
            let spread = quote.spread().ok_or_else(|| MarketDataError::Api {
                status: 200,
                body: format!(
                    "spread overflow for {}: bid {} ask {}",
                    symbol, quote.bid, quote.ask
                ),
            })?;
            values.insert(symbol.to_string(), spread);
        }

        Ok(SpreadSample::new(values))
    }

    /// Rank a fresh ticker snapshot, then sample the selected symbols
    ///
    /// The symbol set is recomputed on every call.
    pub async fn sample_ranked(
        &self,
        quote_asset: &str,
        field: &str,
    ) -> Result<SpreadSample, MarketDataError> {
        let snapshot = self.source.fetch_24h_ticker().await?;
        let symbols = self.ranker.rank(&snapshot, quote_asset, field, self.limit);

        tracing::debug!(
            quote_asset,
            field,
            symbols = ?symbols.as_slice(),
            "Sampling spreads"
        );

        self.sample(&symbols).await
    }
}
