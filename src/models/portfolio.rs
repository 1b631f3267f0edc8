use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Data origin marker attached to a portfolio snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSource {
    Live,
    Disconnected,
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Disconnected
    }
}

/// A single enriched holding as served to the risk engine and the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub tradingsymbol: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub last_price: f64,
    #[serde(default)]
    pub average_price: f64,
    #[serde(default)]
    pub pnl: f64,
    #[serde(default)]
    pub day_change: f64,
    #[serde(default)]
    pub day_change_percentage: f64,
    /// last_price * quantity
    #[serde(default)]
    pub value: f64,
    #[serde(default = "default_sector")]
    pub sector: String,
}

fn default_sector() -> String {
    "Other".to_string()
}

/// Aggregated portfolio state, built per request by the aggregator.
///
/// A disconnected session produces the all-zero shape; the scoring engine
/// consumes it without special-casing. Missing fields deserialize to zero or
/// empty collections, never to an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    #[serde(default)]
    pub total_value: f64,
    /// sector name -> percentage of total value (0-100)
    #[serde(default)]
    pub sector_allocation: BTreeMap<String, f64>,
    #[serde(default)]
    pub holdings_count: usize,
    #[serde(default)]
    pub unrealized_pnl: f64,
    #[serde(default)]
    pub day_change: f64,
    #[serde(default)]
    pub day_change_percentage: f64,
    #[serde(default)]
    pub holdings: Vec<Holding>,
    #[serde(default)]
    pub data_source: DataSource,
}

impl PortfolioSnapshot {
    /// The empty state served when no broker session exists. No fake data.
    pub fn disconnected() -> Self {
        Self {
            total_value: 0.0,
            sector_allocation: BTreeMap::new(),
            holdings_count: 0,
            unrealized_pnl: 0.0,
            day_change: 0.0,
            day_change_percentage: 0.0,
            holdings: Vec::new(),
            data_source: DataSource::Disconnected,
        }
    }
}
