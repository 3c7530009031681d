//! Run command implementation

use super::Reporter;
use crate::analytics::{SpreadSampler, SymbolRanker};
use crate::config::Config;
use crate::exchange::{BinanceRestClient, MarketDataSource};
use crate::sampling::{
    shutdown_channel, DeltaEngine, FailurePolicy, Scheduler, SchedulerStats, ShutdownSignal,
};
use crate::telemetry::MetricsPublisher;
use clap::Args;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Port for the /metrics endpoint (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Stop after this many delta cycles
    #[arg(long)]
    pub max_cycles: Option<u64>,

    /// Keep running when a cycle fails instead of exiting
    #[arg(long)]
    pub skip_failures: bool,

    /// Skip the one-shot startup reports
    #[arg(long)]
    pub no_reports: bool,
}

/// Options for [`run_pipeline`] beyond the configuration file
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub max_cycles: Option<u64>,
    pub skip_failures: bool,
    pub no_reports: bool,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let port = self.port.unwrap_or(config.telemetry.metrics_port);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let (publisher, _server) = MetricsPublisher::with_http_listener(addr)?;
        let source = Arc::new(BinanceRestClient::with_config(config.exchange.rest_config()));

        let (handle, signal) = shutdown_channel();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Received shutdown signal");
                handle.trigger();
            }
        });

        let options = RunOptions {
            max_cycles: self.max_cycles,
            skip_failures: self.skip_failures,
            no_reports: self.no_reports,
        };

        run_pipeline(source, Arc::new(publisher), config, &options, signal).await?;
        Ok(())
    }
}

/// Health check, startup reports, then the delta loop until shutdown
pub async fn run_pipeline<S: MarketDataSource>(
    source: Arc<S>,
    publisher: Arc<MetricsPublisher>,
    config: &Config,
    options: &RunOptions,
    signal: ShutdownSignal,
) -> anyhow::Result<SchedulerStats> {
    source.ping().await?;
    tracing::info!("Exchange API reachable");

    if !options.no_reports {
        let reporter = Reporter::new(Arc::clone(&source), config);
        for report in reporter.startup_reports(&config.reports).await? {
            println!("{}", report);
        }
    }

    let sampler = SpreadSampler::with_ranker(
        source,
        SymbolRanker::with_matching(config.ranking.quote_match),
        config.ranking.limit,
    );
    let engine = DeltaEngine::with_mode(sampler, config.sampler.interval(), config.sampler.mode);

    let mut scheduler_config = config.sampler.scheduler_config();
    scheduler_config.max_cycles = options.max_cycles;
    if options.skip_failures {
        scheduler_config.on_error = FailurePolicy::SkipCycle;
    }

    let mut scheduler = Scheduler::new(engine, publisher, scheduler_config);
    let stats = scheduler.run(signal).await?;

    Ok(stats)
}
