use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::{debug, info};

use crate::models::{Bias, ComponentScores, StockIntelligence};
use crate::utils::round2;

const WEIGHT_FUNDAMENTAL: f64 = 0.35;
const WEIGHT_TECHNICAL: f64 = 0.35;
const WEIGHT_RISK: f64 = 0.20;
const WEIGHT_SENTIMENT: f64 = 0.10;

const QUOTE_TIMEOUT: Duration = Duration::from_secs(2);
const CACHE_TTL_MINUTES: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Archetype {
    Weak,
    Average,
    Strong,
}

impl Archetype {
    fn base_bias(self) -> f64 {
        match self {
            Archetype::Weak => -0.40,
            Archetype::Average => 0.0,
            Archetype::Strong => 0.40,
        }
    }
}

struct CachedIntel {
    intel: StockIntelligence,
    cached_at: DateTime<Utc>,
}

/// Per-symbol stock analysis.
///
/// Scores come from a deterministic simulation seeded from the symbol, so a
/// symbol always tells the same story; only the price is fetched live (short
/// timeout, simulated fallback). Results are cached per symbol to spare the
/// quote endpoint.
pub struct StockIntelligenceService {
    client: reqwest::Client,
    cache: DashMap<String, CachedIntel>,
    ttl: chrono::Duration,
}

impl StockIntelligenceService {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(QUOTE_TIMEOUT)
                .build()
                .unwrap_or_default(),
            cache: DashMap::new(),
            ttl: chrono::Duration::minutes(CACHE_TTL_MINUTES),
        }
    }

    pub async fn intelligence(&self, symbol: &str) -> StockIntelligence {
        if let Some(entry) = self.cache.get(symbol) {
            if Utc::now() - entry.cached_at < self.ttl {
                debug!("Serving cached intelligence for {symbol}");
                return entry.intel.clone();
            }
        }

        info!("Building intelligence for {symbol}");
        let live_price = self.latest_price(symbol).await;
        let intel = simulate_intelligence(symbol, live_price);

        self.cache.insert(
            symbol.to_string(),
            CachedIntel {
                intel: intel.clone(),
                cached_at: Utc::now(),
            },
        );
        intel
    }

    /// Best-effort live quote; None on any failure
    async fn latest_price(&self, symbol: &str) -> Option<f64> {
        // NSE symbols need the exchange suffix
        let ticker = if symbol.contains('.') || symbol.contains('=') || symbol.starts_with('^')
        {
            symbol.to_string()
        } else {
            format!("{symbol}.NS")
        };
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{ticker}?interval=1d&range=1d"
        );

        let resp = self
            .client
            .get(url)
            .header("User-Agent", "Mozilla/5.0")
            .send()
            .await
            .ok()?;
        let body = resp.json::<QuoteChartResponse>().await.ok()?;
        body.chart
            .result?
            .into_iter()
            .next()?
            .meta
            .regular_market_price
    }
}

impl Default for StockIntelligenceService {
    fn default() -> Self {
        Self::new()
    }
}

// Minimal quote response structs
#[derive(Debug, Deserialize)]
struct QuoteChartResponse {
    chart: QuoteChart,
}

#[derive(Debug, Deserialize)]
struct QuoteChart {
    result: Option<Vec<QuoteResult>>,
}

#[derive(Debug, Deserialize)]
struct QuoteResult {
    meta: QuoteMeta,
}

#[derive(Debug, Deserialize)]
struct QuoteMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

fn symbol_seed(symbol: &str) -> u64 {
    symbol.bytes().map(u64::from).sum()
}

/// Deterministic per-symbol simulation: the symbol picks an archetype which
/// biases every component score.
fn simulate_intelligence(symbol: &str, live_price: Option<f64>) -> StockIntelligence {
    let mut rng = StdRng::seed_from_u64(symbol_seed(symbol));

    let roll: f64 = rng.random();
    let archetype = if roll < 0.33 {
        Archetype::Weak
    } else if roll < 0.66 {
        Archetype::Average
    } else {
        Archetype::Strong
    };
    let base_bias = archetype.base_bias();

    let (price, is_simulated) = match live_price {
        Some(p) => (p, false),
        None => (rng.random_range(500..=3000) as f64, true),
    };

    let rev_growth = rng.random_range(-0.10..0.40) + base_bias;
    let profit_margin = rng.random_range(0.02..0.30) + base_bias * 0.5;

    let mut fundamental: i64 = 50;
    if rev_growth > 0.15 {
        fundamental += 20;
    } else if rev_growth < 0.0 {
        fundamental -= 10;
    }
    if profit_margin > 0.15 {
        fundamental += 15;
    } else if profit_margin < 0.05 {
        fundamental -= 5;
    }
    let fundamental = fundamental.clamp(0, 100);

    let technical: i64 = match archetype {
        Archetype::Strong => rng.random_range(65..=90),
        Archetype::Weak => rng.random_range(20..=45),
        Archetype::Average => rng.random_range(40..=60),
    };
    let risk: i64 = rng.random_range(30..=90);
    let sentiment =
        ((rng.random_range(40..=90) as f64 + base_bias * 20.0) as i64).clamp(0, 100);

    let mut ai_score = (fundamental as f64 * WEIGHT_FUNDAMENTAL
        + technical as f64 * WEIGHT_TECHNICAL
        + risk as f64 * WEIGHT_RISK
        + sentiment as f64 * WEIGHT_SENTIMENT) as i64;

    // pull archetypes toward their ends for variety
    if archetype == Archetype::Strong && ai_score < 70 {
        ai_score += 10;
    }
    if archetype == Archetype::Weak && ai_score > 40 {
        ai_score -= 10;
    }
    let ai_score = ai_score.clamp(0, 100);

    let confidence = round2(rng.random_range(0.70..0.95));

    let mut reasoning = Vec::new();
    if rev_growth > 0.15 {
        reasoning.push(format!(
            "Strong Rev Growth ({}%)",
            (rev_growth * 100.0) as i64
        ));
    }
    if rev_growth < 0.0 {
        reasoning.push("Declining Revenue".to_string());
    }
    if technical > 60 {
        reasoning.push("Bullish Technical Trend".to_string());
    }
    if technical < 40 {
        reasoning.push("Bearish Price Structure".to_string());
    }
    if risk > 70 {
        reasoning.push("Low Volatility (Safe)".to_string());
    }
    if risk < 40 {
        reasoning.push("High Volatility / High Beta".to_string());
    }
    if reasoning.is_empty() {
        reasoning.push("Market signals are mixed/neutral".to_string());
    }
    reasoning.truncate(3);

    StockIntelligence {
        symbol: symbol.to_string(),
        ai_score,
        bias: Bias::from_score(ai_score),
        confidence,
        components: ComponentScores {
            fundamental,
            technical,
            risk,
            sentiment,
        },
        reasoning,
        price,
        is_simulated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_symbol_always_tells_the_same_story() {
        let a = simulate_intelligence("RELIANCE", None);
        let b = simulate_intelligence("RELIANCE", None);
        assert_eq!(a, b);
    }

    #[test]
    fn scores_stay_in_range() {
        for symbol in ["TCS", "INFY", "HDFCBANK", "ZOMATO", "XYZ", "A", "WIPRO-EQ"] {
            let intel = simulate_intelligence(symbol, None);
            assert!((0..=100).contains(&intel.ai_score));
            assert!((0..=100).contains(&intel.components.fundamental));
            assert!((0..=100).contains(&intel.components.sentiment));
            assert!((0.70..=0.95).contains(&intel.confidence));
            assert!(!intel.reasoning.is_empty());
            assert!(intel.reasoning.len() <= 3);
            assert!(intel.is_simulated);
        }
    }

    #[test]
    fn verdict_matches_score() {
        for symbol in ["TCS", "INFY", "SBIN", "ITC", "MARUTI"] {
            let intel = simulate_intelligence(symbol, None);
            assert_eq!(intel.bias, Bias::from_score(intel.ai_score));
        }
    }

    #[test]
    fn live_price_is_passed_through() {
        let intel = simulate_intelligence("TCS", Some(4123.5));
        assert_eq!(intel.price, 4123.5);
        assert!(!intel.is_simulated);
    }

    #[tokio::test]
    async fn results_are_cached_per_symbol() {
        let service = StockIntelligenceService::new();
        let first = service.intelligence("OFFLINE_TEST_SYMBOL").await;
        let second = service.intelligence("OFFLINE_TEST_SYMBOL").await;
        assert_eq!(first, second);
    }
}
