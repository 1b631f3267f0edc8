mod intelligence;
mod market;
mod portfolio;
mod risk;

pub use intelligence::{Bias, ComponentScores, StockIntelligence};
pub use market::{MacroSignals, MarketContext, MarketRegime, Trend};
pub use portfolio::{DataSource, Holding, PortfolioSnapshot};
pub use risk::{AlertKind, ConcentrationAlert, RiskAssessment, RiskLabel, RiskMetrics};
