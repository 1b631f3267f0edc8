use serde::{Deserialize, Serialize};

/// Qualitative verdict derived from the aggregate score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bias {
    Buy,
    Hold,
    Avoid,
}

impl Bias {
    /// BUY >= 70, AVOID <= 45, HOLD in between
    pub fn from_score(score: i64) -> Self {
        if score >= 70 {
            Bias::Buy
        } else if score <= 45 {
            Bias::Avoid
        } else {
            Bias::Hold
        }
    }
}

/// Per-factor sub-scores behind the aggregate (each 0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub fundamental: i64,
    pub technical: i64,
    pub risk: i64,
    pub sentiment: i64,
}

/// Per-symbol analysis served by the stock intelligence endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockIntelligence {
    pub symbol: String,
    pub ai_score: i64,
    pub bias: Bias,
    pub confidence: f64,
    pub components: ComponentScores,
    /// Up to three human-readable drivers of the score
    pub reasoning: Vec<String>,
    pub price: f64,
    pub is_simulated: bool,
}
