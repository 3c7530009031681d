//! Market-data errors

use thiserror::Error;

/// Errors returned by a [`MarketDataSource`](super::MarketDataSource)
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// Health check failed; the process must not continue past startup
    #[error("Exchange API is unreachable: {0}")]
    Unreachable(String),
    /// Non-success status, an undecodable body, or values outside the decimal range
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    /// Connection, DNS or timeout failure before a response arrived
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl MarketDataError {
    /// HTTP status attached to the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            MarketDataError::Api { status, .. } => Some(*status),
            MarketDataError::Transport(e) => e.status().map(|s| s.as_u16()),
            MarketDataError::Unreachable(_) => None,
        }
    }

    /// Whether the failure was the startup health check
    pub fn is_unreachable(&self) -> bool {
        matches!(self, MarketDataError::Unreachable(_))
    }
}
