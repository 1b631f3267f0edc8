use async_trait::async_trait;
use thiserror::Error;

use crate::models::MacroSignals;

#[derive(Debug, Error)]
pub enum SignalProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Source of macro stress indicators, live or simulated.
///
/// Callers never see a failure: the market data service degrades any error
/// to neutral defaults.
#[async_trait]
pub trait SignalProvider: Send + Sync {
    async fn fetch_signals(&self) -> Result<MacroSignals, SignalProviderError>;
}
