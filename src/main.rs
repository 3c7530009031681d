use clap::Parser;
use spread_watch::analytics::{SpreadSampler, SymbolRanker};
use spread_watch::cli::{Cli, Commands, Reporter};
use spread_watch::config::{Config, SymbolQuery};
use spread_watch::exchange::{BinanceRestClient, MarketDataSource};
use spread_watch::report;
use spread_watch::sampling::DeltaEngine;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).unwrap_or_default()
    });

    spread_watch::telemetry::init_telemetry(&config.telemetry)?;

    let client = || Arc::new(BinanceRestClient::with_config(config.exchange.rest_config()));

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting spread delta exporter");
            args.execute(&config).await?;
        }
        Commands::Ping => {
            client().ping().await?;
            println!("Binance API reachable at {}", config.exchange.base_url);
        }
        Commands::Top(args) => {
            let reporter = Reporter::new(client(), &config);
            for query in args.resolve(&config.reports.top) {
                println!("{}", reporter.top(&query).await?);
            }
        }
        Commands::Notional(args) => {
            let reporter = Reporter::new(client(), &config);
            for query in args.resolve(&config.reports.notional) {
                println!("{}", reporter.notional(&query).await?);
            }
        }
        Commands::Spread(args) => {
            let reporter = Reporter::new(client(), &config);
            for query in args.resolve(&config.reports.spread) {
                println!("{}", reporter.spread(&query).await?);
            }
        }
        Commands::Delta(args) => {
            let query = args
                .resolve(&[SymbolQuery::new(
                    config.sampler.asset.clone(),
                    config.sampler.field.clone(),
                )])
                .remove(0);
            let sampler = SpreadSampler::with_ranker(
                client(),
                SymbolRanker::with_matching(config.ranking.quote_match),
                config.ranking.limit,
            );
            let mut engine =
                DeltaEngine::with_mode(sampler, config.sampler.interval(), config.sampler.mode);
            let delta = engine.delta(&query.asset, &query.field).await?;
            println!("{}", report::render_delta(&delta));
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Exchange: {} (timeout {}s)",
                config.exchange.base_url, config.exchange.timeout_secs
            );
            println!(
                "  Ranking: top {} ({:?} match)",
                config.ranking.limit, config.ranking.quote_match
            );
            println!(
                "  Notional: depth {} / {} levels",
                config.notional.depth_limit, config.notional.levels
            );
            println!(
                "  Sampler: {}/{} every {}s ({:?}, on error {:?})",
                config.sampler.asset,
                config.sampler.field,
                config.sampler.interval_secs,
                config.sampler.mode,
                config.sampler.on_error
            );
            println!(
                "  Metrics: :{}/metrics, log level {}",
                config.telemetry.metrics_port, config.telemetry.log_level
            );
        }
    }

    Ok(())
}
