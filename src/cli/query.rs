//! Query arguments for the one-shot report commands

use crate::config::SymbolQuery;
use clap::Args;

#[derive(Args, Debug, Default)]
pub struct QueryArgs {
    /// Quote asset to filter symbols by (e.g. BTC)
    #[arg(long)]
    pub asset: Option<String>,

    /// Ticker field to rank by (e.g. volume, count)
    #[arg(long)]
    pub field: Option<String>,
}

impl QueryArgs {
    /// Queries to run: the configured ones, or a single overridden query
    ///
    /// A missing half of an override is taken from the first configured query.
    pub fn resolve(&self, configured: &[SymbolQuery]) -> Vec<SymbolQuery> {
        if self.asset.is_none() && self.field.is_none() {
            return configured.to_vec();
        }

        let fallback = configured
            .first()
            .cloned()
            .unwrap_or_else(|| SymbolQuery::new("USDT", "count"));

        vec![SymbolQuery {
            asset: self.asset.clone().unwrap_or(fallback.asset),
            field: self.field.clone().unwrap_or(fallback.field),
        }]
    }
}
