use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("broker session not connected")]
    NotConnected,

    #[error("broker error: {0}")]
    Api(String),
}

/// Holding as returned by the brokerage, before enrichment
#[derive(Debug, Clone, Deserialize)]
pub struct RawHolding {
    pub tradingsymbol: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub last_price: f64,
    #[serde(default)]
    pub average_price: f64,
    /// Previous session close; 0 means missing, falls back to last_price
    #[serde(default)]
    pub close_price: f64,
    #[serde(default)]
    pub pnl: f64,
}

/// Brokerage integration seam. OAuth/session handling lives behind this
/// trait and is out of scope here; the aggregator only needs raw holdings.
#[async_trait]
pub trait BrokerProvider: Send + Sync {
    async fn fetch_holdings(&self) -> Result<Vec<RawHolding>, BrokerError>;
}

/// Stand-in used when no broker session exists. Always errors, which the
/// aggregator translates to the disconnected snapshot.
pub struct DisconnectedBroker;

#[async_trait]
impl BrokerProvider for DisconnectedBroker {
    async fn fetch_holdings(&self) -> Result<Vec<RawHolding>, BrokerError> {
        Err(BrokerError::NotConnected)
    }
}
