use std::collections::BTreeMap;

use chrono::Utc;

use crate::models::{MacroSignals, MarketContext, MarketRegime, Trend};
use crate::services::market_data::MarketDataService;

/// Classify macro signals into a discrete regime.
///
/// One point for each stress indicator: VIX above 20, index drawdown above
/// 5%, rising interest rates, rising bond yields.
pub fn determine_regime(signals: &MacroSignals) -> MarketRegime {
    let mut score = 0;
    if signals.vix > 20.0 {
        score += 1;
    }
    if signals.index_drawdown > 5.0 {
        score += 1;
    }
    if signals.interest_rates_trend == Trend::Up {
        score += 1;
    }
    if signals.bond_yields_trend == Trend::Up {
        score += 1;
    }

    match score {
        0 => MarketRegime::Normal,
        1 | 2 => MarketRegime::ElevatedVolatility,
        _ => MarketRegime::StagflationRisk,
    }
}

/// Per-sector qualitative advice for the given regime.
///
/// Regime-driven entries are authoritative; the oil pass only adds sectors
/// the regime table did not cover.
pub fn sector_impacts(
    regime: MarketRegime,
    signals: &MacroSignals,
) -> BTreeMap<String, String> {
    let mut impacts = BTreeMap::new();

    let regime_entries: [(&str, &str); 3] = match regime {
        MarketRegime::Normal => [
            ("Technology", "Positive (Risk On)"),
            ("Financials", "Positive (Credit Growth)"),
            ("Healthcare", "Neutral"),
        ],
        MarketRegime::ElevatedVolatility => [
            (
                "Technology",
                if signals.bond_yields_trend == Trend::Up {
                    "Negative (Valuation Pressure)"
                } else {
                    "Neutral"
                },
            ),
            ("FMCG", "Positive (Defensive Rotation)"),
            ("Pharma", "Positive (Safety)"),
        ],
        MarketRegime::StagflationRisk => [
            ("Technology", "Negative (High Risk)"),
            ("Financials", "Negative (NPA Risks)"),
            ("Metals", "Positive (Inflation Hedge)"),
        ],
    };
    for (sector, label) in regime_entries {
        impacts.insert(sector.to_string(), label.to_string());
    }

    if signals.oil_prices_trend == Trend::Up {
        let oil_entries = [
            ("Oil & Gas", "Positive (Margin Expansion)"),
            ("Paints", "Negative (Input Costs)"),
            ("Aviation", "Negative (Fuel Costs)"),
        ];
        for (sector, label) in oil_entries {
            impacts
                .entry(sector.to_string())
                .or_insert_with(|| label.to_string());
        }
    }

    impacts
}

/// Current regime plus the signals and sector annotations behind it
pub async fn market_context(market_data: &MarketDataService) -> MarketContext {
    let signals = market_data.macro_signals().await;
    let regime = determine_regime(&signals);
    let impact_map = sector_impacts(regime, &signals);

    MarketContext {
        regime,
        signals,
        impact_map,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(vix: f64, drawdown: f64, rates: Trend, yields: Trend) -> MacroSignals {
        MacroSignals {
            vix,
            index_drawdown: drawdown,
            interest_rates_trend: rates,
            bond_yields_trend: yields,
            ..MacroSignals::default()
        }
    }

    #[test]
    fn neutral_signals_classify_normal() {
        let s = MacroSignals::default();
        assert_eq!(determine_regime(&s), MarketRegime::Normal);
    }

    #[test]
    fn single_stress_indicator_is_elevated_volatility() {
        let s = signals(21.0, 0.0, Trend::Stable, Trend::Stable);
        assert_eq!(determine_regime(&s), MarketRegime::ElevatedVolatility);
    }

    #[test]
    fn two_indicators_stay_elevated_volatility() {
        let s = signals(21.0, 6.0, Trend::Stable, Trend::Stable);
        assert_eq!(determine_regime(&s), MarketRegime::ElevatedVolatility);
    }

    #[test]
    fn three_or_four_indicators_are_stagflation_risk() {
        let s = signals(21.0, 6.0, Trend::Up, Trend::Stable);
        assert_eq!(determine_regime(&s), MarketRegime::StagflationRisk);

        let s = signals(21.0, 6.0, Trend::Up, Trend::Up);
        assert_eq!(determine_regime(&s), MarketRegime::StagflationRisk);
    }

    #[test]
    fn thresholds_are_strict() {
        let s = signals(20.0, 5.0, Trend::Stable, Trend::Down);
        assert_eq!(determine_regime(&s), MarketRegime::Normal);
    }

    #[test]
    fn normal_regime_impacts() {
        let s = MacroSignals::default();
        let impacts = sector_impacts(MarketRegime::Normal, &s);
        assert_eq!(impacts["Technology"], "Positive (Risk On)");
        assert_eq!(impacts["Financials"], "Positive (Credit Growth)");
        assert_eq!(impacts["Healthcare"], "Neutral");
        assert!(!impacts.contains_key("Oil & Gas"));
    }

    #[test]
    fn technology_impact_depends_on_yields_under_elevated_volatility() {
        let rising = signals(21.0, 0.0, Trend::Stable, Trend::Up);
        let impacts = sector_impacts(MarketRegime::ElevatedVolatility, &rising);
        assert_eq!(impacts["Technology"], "Negative (Valuation Pressure)");

        let stable = signals(21.0, 0.0, Trend::Stable, Trend::Stable);
        let impacts = sector_impacts(MarketRegime::ElevatedVolatility, &stable);
        assert_eq!(impacts["Technology"], "Neutral");
    }

    #[test]
    fn rising_oil_adds_sectors_without_overriding_regime_entries() {
        let s = MacroSignals {
            oil_prices_trend: Trend::Up,
            ..MacroSignals::default()
        };
        let impacts = sector_impacts(MarketRegime::StagflationRisk, &s);
        assert_eq!(impacts["Oil & Gas"], "Positive (Margin Expansion)");
        assert_eq!(impacts["Paints"], "Negative (Input Costs)");
        assert_eq!(impacts["Aviation"], "Negative (Fuel Costs)");
        // regime entry untouched by the oil pass
        assert_eq!(impacts["Metals"], "Positive (Inflation Hedge)");
        assert_eq!(impacts.len(), 6);
    }
}
