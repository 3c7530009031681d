//! Derived market metrics
//!
//! Symbol ranking over a ticker snapshot, order-book notional value and
//! bid/ask spread sampling.

mod notional;
mod ranker;
mod spread;

pub use notional::{
    side_notional, BookSide, NotionalAggregator, NotionalResult, DEFAULT_DEPTH_LIMIT,
    DEFAULT_NOTIONAL_LEVELS,
};
pub use ranker::{
    coerce_numeric, QuoteMatch, RankedSymbol, SymbolRanker, SymbolSet, DEFAULT_RANK_LIMIT,
};
pub use spread::{SpreadSample, SpreadSampler};
