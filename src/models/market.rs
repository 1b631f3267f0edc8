use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a slow-moving macro series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Default for Trend {
    fn default() -> Self {
        Trend::Stable
    }
}

/// Snapshot of market stress indicators.
///
/// This is the one canonical representation of "possibly missing" signals:
/// every field has a documented neutral default (vix 15, drawdown 0, trends
/// STABLE), applied both on deserialization and via `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSignals {
    #[serde(default = "default_vix")]
    pub vix: f64,
    /// Peak-to-current index decline, as a percentage
    #[serde(default)]
    pub index_drawdown: f64,
    #[serde(default)]
    pub interest_rates_trend: Trend,
    #[serde(default)]
    pub bond_yields_trend: Trend,
    #[serde(default)]
    pub oil_prices_trend: Trend,
    #[serde(default = "default_market_index")]
    pub market_index: f64,
    #[serde(default = "default_true")]
    pub is_simulated: bool,
}

fn default_vix() -> f64 {
    15.0
}

fn default_market_index() -> f64 {
    24500.0
}

fn default_true() -> bool {
    true
}

impl Default for MacroSignals {
    fn default() -> Self {
        Self {
            vix: default_vix(),
            index_drawdown: 0.0,
            interest_rates_trend: Trend::Stable,
            bond_yields_trend: Trend::Stable,
            oil_prices_trend: Trend::Stable,
            market_index: default_market_index(),
            is_simulated: true,
        }
    }
}

/// Discrete macro stress classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketRegime {
    Normal,
    ElevatedVolatility,
    StagflationRisk,
}

impl MarketRegime {
    /// One-line explanation of the classification
    #[allow(dead_code)]
    pub fn headline(&self) -> &'static str {
        match self {
            MarketRegime::Normal => "Market indicators are stable.",
            MarketRegime::ElevatedVolatility => "Volatility or drawdown detected.",
            MarketRegime::StagflationRisk => {
                "High volatility and negative trend confluence."
            }
        }
    }

    /// Portfolio-level risk status shown on the dashboard
    pub fn risk_status(&self) -> &'static str {
        match self {
            MarketRegime::Normal => "Low",
            MarketRegime::ElevatedVolatility => "Moderate",
            MarketRegime::StagflationRisk => "High",
        }
    }
}

/// Regime plus the signals and sector annotations that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketContext {
    pub regime: MarketRegime,
    pub signals: MacroSignals,
    /// sector -> qualitative label, e.g. "Positive (Risk On)"
    pub impact_map: BTreeMap<String, String>,
    pub timestamp: DateTime<Utc>,
}
