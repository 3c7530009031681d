//! Telemetry module
//!
//! Structured logging and the Prometheus gauge registry

mod logging;
mod metrics;

pub use self::logging::{init_logging, LogFormat};
pub use self::metrics::{
    MetricsPublisher, ABSOLUTE_DELTA_HELP, ABSOLUTE_DELTA_METRIC, SYMBOL_LABEL,
};

use crate::config::TelemetryConfig;

/// Initialize logging from configuration
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)
}
