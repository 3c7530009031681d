//! Absolute spread deltas between consecutive samples

use crate::analytics::{SpreadSample, SpreadSampler};
use crate::exchange::{MarketDataError, MarketDataSource};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

/// Identifies a baseline: the (quote asset, ranking field) a sample was drawn for
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeltaKey {
    pub asset: String,
    pub field: String,
}

impl DeltaKey {
    pub fn new(asset: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for DeltaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.asset, self.field)
    }
}

/// How each delta cycle obtains its baseline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaMode {
    /// Every cycle samples twice, one interval apart
    #[default]
    DoubleSample,
    /// Reuse the stored baseline and sample once per cycle
    Rolling,
}

/// Absolute spread change per symbol for one cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadDelta {
    pub key: DeltaKey,
    pub values: BTreeMap<String, Decimal>,
    pub computed_at: DateTime<Utc>,
}

impl SpreadDelta {
    pub fn get(&self, symbol: &str) -> Option<Decimal> {
        self.values.get(symbol).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// |old − new| for symbols present in both samples
///
/// Saturates at `Decimal::MAX` when the difference leaves the decimal range.
pub fn absolute_delta(old: &SpreadSample, new: &SpreadSample) -> BTreeMap<String, Decimal> {
    old.values
        .iter()
        .filter_map(|(symbol, old_value)| {
            let new_value = new.values.get(symbol)?;
            Some((symbol.clone(), old_value.saturating_sub(*new_value).abs()))
        })
        .collect()
}

/// Holds the previous sample per key and diffs new samples against it
pub struct DeltaEngine<S: MarketDataSource> {
    sampler: SpreadSampler<S>,
    interval: Duration,
    mode: DeltaMode,
    baselines: HashMap<DeltaKey, SpreadSample>,
}

impl<S: MarketDataSource> DeltaEngine<S> {
    /// Create an engine in double-sample mode
    pub fn new(sampler: SpreadSampler<S>, interval: Duration) -> Self {
        Self::with_mode(sampler, interval, DeltaMode::default())
    }

    pub fn with_mode(sampler: SpreadSampler<S>, interval: Duration, mode: DeltaMode) -> Self {
        Self {
            sampler,
            interval,
            mode,
            baselines: HashMap::new(),
        }
    }

    pub fn mode(&self) -> DeltaMode {
        self.mode
    }

    /// Stored baseline for a key, if a cycle completed for it
    pub fn baseline(&self, key: &DeltaKey) -> Option<&SpreadSample> {
        self.baselines.get(key)
    }

    /// Run one delta cycle for (asset, field)
    ///
    /// The stored baseline is replaced only after both samples succeeded;
    /// on error it is left untouched.
    pub async fn delta(
        &mut self,
        asset: &str,
        field: &str,
    ) -> Result<SpreadDelta, MarketDataError> {
        let key = DeltaKey::new(asset, field);

        let old = match (self.mode, self.baselines.get(&key)) {
            (DeltaMode::Rolling, Some(previous)) => previous.clone(),
            _ => {
                let first = self.sampler.sample_ranked(asset, field).await?;
                tokio::time::sleep(self.interval).await;
                first
            }
        };

        let new = self.sampler.sample_ranked(asset, field).await?;
        let values = absolute_delta(&old, &new);

        tracing::debug!(
            key = %key,
            symbols = values.len(),
            dropped = old.len().max(new.len()) - values.len(),
            "Computed spread delta"
        );

        self.baselines.insert(key.clone(), new);

        Ok(SpreadDelta {
            key,
            values,
            computed_at: Utc::now(),
        })
    }
}
