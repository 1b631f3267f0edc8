use serde::{Deserialize, Serialize};

/// Qualitative bucket for the overall 0-100 risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskLabel {
    /// Conservative <= 30, Moderate <= 60, Aggressive above
    pub fn from_score(score: u32) -> Self {
        if score <= 30 {
            RiskLabel::Conservative
        } else if score <= 60 {
            RiskLabel::Moderate
        } else {
            RiskLabel::Aggressive
        }
    }
}

/// Raw inputs behind the score, surfaced for explainability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub top_sector_pct: f64,
    pub top_5_stock_pct: f64,
    pub holdings_count: usize,
}

/// Weighted, explainable risk score. Derived fresh on every call; carries no
/// identity beyond the snapshot that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: u32,
    pub risk_label: RiskLabel,
    /// Ordered, never empty
    pub risk_reasons: Vec<String>,
    pub metrics: RiskMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Stock,
    Sector,
}

/// A single concentration breach, for direct display in the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationAlert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    /// Trading symbol or sector name, depending on kind
    pub symbol: String,
    /// Percentage of total portfolio value, rounded to one decimal
    pub value: f64,
    pub message: String,
}
