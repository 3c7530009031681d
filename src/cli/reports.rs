//! One-shot startup reports

use crate::analytics::{NotionalAggregator, SpreadSampler, SymbolRanker};
use crate::config::{Config, ReportsConfig, SymbolQuery};
use crate::exchange::{MarketDataError, MarketDataSource};
use crate::report;
use std::sync::Arc;

/// Renders the top-symbol, notional and spread reports
pub struct Reporter<S: MarketDataSource> {
    source: Arc<S>,
    ranker: SymbolRanker,
    limit: usize,
    aggregator: NotionalAggregator<S>,
    sampler: SpreadSampler<S>,
}

impl<S: MarketDataSource> Reporter<S> {
    pub fn new(source: Arc<S>, config: &Config) -> Self {
        let ranker = SymbolRanker::with_matching(config.ranking.quote_match);
        let limit = config.ranking.limit;

        Self {
            aggregator: NotionalAggregator::with_depth(
                Arc::clone(&source),
                config.notional.depth_limit,
                config.notional.levels,
            ),
            sampler: SpreadSampler::with_ranker(Arc::clone(&source), ranker, limit),
            source,
            ranker,
            limit,
        }
    }

    /// Top symbols by a field
    pub async fn top(&self, query: &SymbolQuery) -> Result<String, MarketDataError> {
        let snapshot = self.source.fetch_24h_ticker().await?;
        let ranked = self
            .ranker
            .rank_with_values(&snapshot, &query.asset, &query.field, self.limit);

        tracing::info!(
            asset = %query.asset,
            field = %query.field,
            symbols = ?ranked.iter().map(|r| r.symbol.as_str()).collect::<Vec<_>>(),
            "Top symbols"
        );

        Ok(report::render_top(&query.asset, &query.field, &ranked))
    }

    /// Notional value of the top levels for the query's top symbols
    pub async fn notional(&self, query: &SymbolQuery) -> Result<String, MarketDataError> {
        let snapshot = self.source.fetch_24h_ticker().await?;
        let symbols = self
            .ranker
            .rank(&snapshot, &query.asset, &query.field, self.limit);
        let result = self.aggregator.aggregate(&symbols).await?;

        tracing::info!(
            asset = %query.asset,
            field = %query.field,
            total = %result.total(),
            "Order-book notional"
        );

        Ok(report::render_notional(&query.asset, &query.field, &result))
    }

    /// Current spread for the query's top symbols
    pub async fn spread(&self, query: &SymbolQuery) -> Result<String, MarketDataError> {
        let sample = self.sampler.sample_ranked(&query.asset, &query.field).await?;

        tracing::info!(
            asset = %query.asset,
            field = %query.field,
            symbols = sample.len(),
            "Price spread"
        );

        Ok(report::render_spread(&query.asset, &query.field, &sample))
    }

    /// Every configured report in startup order: top, notional, spread
    pub async fn startup_reports(
        &self,
        reports: &ReportsConfig,
    ) -> Result<Vec<String>, MarketDataError> {
        let mut out = Vec::new();

        for query in &reports.top {
            out.push(self.top(query).await?);
        }
        for query in &reports.notional {
            out.push(self.notional(query).await?);
        }
        for query in &reports.spread {
            out.push(self.spread(query).await?);
        }

        Ok(out)
    }
}
