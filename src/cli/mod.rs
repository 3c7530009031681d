//! CLI interface for spread-watch
//!
//! Provides subcommands for:
//! - `run`: Startup reports, then the spread delta loop with `/metrics`
//! - `ping`: Exchange health check
//! - `top`, `notional`, `spread`: One-shot reports
//! - `delta`: A single delta cycle
//! - `config`: Show the effective configuration

mod query;
mod reports;
mod run;

pub use query::QueryArgs;
pub use reports::Reporter;
pub use run::{run_pipeline, RunArgs, RunOptions};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "spread-watch")]
#[command(about = "Exports Binance bid/ask spread deltas as Prometheus gauges")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run startup reports and the delta loop
    Run(RunArgs),
    /// Check that the exchange API is reachable
    Ping,
    /// Print the top symbols for a quote asset
    Top(QueryArgs),
    /// Print order-book notional value for the top symbols
    Notional(QueryArgs),
    /// Print the bid/ask spread for the top symbols
    Spread(QueryArgs),
    /// Run one delta cycle and print it
    Delta(QueryArgs),
    /// Show configuration
    Config,
}
