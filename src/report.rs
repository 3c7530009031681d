//! Plain-text report rendering for the one-shot and loop outputs

use crate::analytics::{NotionalResult, RankedSymbol, SpreadSample};
use crate::sampling::SpreadDelta;
use rust_decimal::Decimal;
use std::fmt::Write;

/// Ranked symbols with their ranking values
pub fn render_top(asset: &str, field: &str, ranked: &[RankedSymbol]) -> String {
    let mut out = format!("Top symbols for {} by {}\n", asset, field);

    if ranked.is_empty() {
        out.push_str("  (no matching symbols)\n");
        return out;
    }

    let _ = writeln!(out, "  {:>2}  {:<14} {:>24}", "#", "symbol", field);
    for (i, entry) in ranked.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}  {:<14} {:>24}",
            i + 1,
            entry.symbol,
            entry.value.normalize()
        );
    }

    out
}

/// Notional value per symbol and side
pub fn render_notional(asset: &str, field: &str, result: &NotionalResult) -> String {
    let mut out = format!("Total notional value for {} by {}\n", asset, field);
    write_pairs(&mut out, result.iter());
    out
}

/// Spread per symbol
pub fn render_spread(asset: &str, field: &str, sample: &SpreadSample) -> String {
    let mut out = format!("Price spread for {} by {}\n", asset, field);
    write_pairs(
        &mut out,
        sample.values.iter().map(|(s, v)| (s.as_str(), *v)),
    );
    out
}

/// Absolute spread delta per symbol
pub fn render_delta(delta: &SpreadDelta) -> String {
    let mut out = format!(
        "Absolute delta for {} at {}\n",
        delta.key,
        delta.computed_at.format("%Y-%m-%d %H:%M:%S%.3f UTC")
    );
    write_pairs(&mut out, delta.values.iter().map(|(s, v)| (s.as_str(), *v)));
    out
}

fn write_pairs<'a>(out: &mut String, pairs: impl Iterator<Item = (&'a str, Decimal)>) {
    let mut empty = true;
    for (key, value) in pairs {
        empty = false;
        let _ = writeln!(out, "  {:<20} {:>24}", key, value.normalize());
    }
    if empty {
        out.push_str("  (none)\n");
    }
}
