use crate::models::{
    ConcentrationAlert, MarketContext, MarketRegime, PortfolioSnapshot, RiskAssessment,
};

/// Compose the mentor analysis as Markdown from the engine outputs.
///
/// This is the deterministic rules path; an LLM-backed generator would sit
/// behind the same signature and fall back here when unavailable. Calm
/// language only, portfolio-level actions only.
pub fn compose_analysis(
    snapshot: &PortfolioSnapshot,
    risk: &RiskAssessment,
    alerts: &[ConcentrationAlert],
    context: &MarketContext,
) -> String {
    let mut observations = Vec::new();
    observations.push(format!(
        "Portfolio value is \u{20b9} {:.0} with a P&L of \u{20b9} {:.0}.",
        snapshot.total_value, snapshot.unrealized_pnl
    ));
    if snapshot.day_change < 0.0 {
        observations.push("Short-term momentum is negative today.".to_string());
    } else {
        observations.push("Daily performance is positive.".to_string());
    }

    let mut risks = Vec::new();
    match context.regime {
        MarketRegime::ElevatedVolatility => risks.push(
            "Market Volatility: The VIX is elevated. Expect swinging prices.".to_string(),
        ),
        MarketRegime::StagflationRisk => risks.push(
            "Macro Stress: High inflation/rates risk signaled by bond markets.".to_string(),
        ),
        MarketRegime::Normal => {}
    }
    risks.push(format!("Overall Risk Profile: **{:?}**.", risk.risk_label));
    for reason in &risk.risk_reasons {
        risks.push(format!("Factor: {reason}"));
    }

    let mut actions = Vec::new();
    match context.regime {
        MarketRegime::StagflationRisk => actions.push(
            "Consider hedging positions or increasing Cash/Gold exposure.".to_string(),
        ),
        MarketRegime::ElevatedVolatility => {
            actions.push("Avoid panic selling. Review stop-loss levels.".to_string())
        }
        MarketRegime::Normal => actions
            .push("Review sector allocation for rebalancing opportunities.".to_string()),
    }
    if !alerts.is_empty() {
        actions.push("Review the specific concentration alerts highlighted above.".to_string());
    }

    let mut md = String::from("**1. Observations**\n");
    for o in &observations {
        md.push_str(&format!("* {o}\n"));
    }
    md.push_str("\n**2. Risks**\n");
    for r in &risks {
        md.push_str(&format!("* {r}\n"));
    }
    md.push_str("\n**3. Actions**\n");
    for a in &actions {
        md.push_str(&format!("* {a}\n"));
    }
    md.push_str("\n**4. Mentor's Note**\n");
    md.push_str("Stay disciplined. Focus on your long-term goals, not short-term noise.");
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::risk_service::{calculate_risk_score, check_concentration_alerts};
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn context(regime: MarketRegime) -> MarketContext {
        MarketContext {
            regime,
            signals: Default::default(),
            impact_map: BTreeMap::new(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn analysis_has_all_four_sections() {
        let snapshot = PortfolioSnapshot::disconnected();
        let risk = calculate_risk_score(&snapshot);
        let alerts = check_concentration_alerts(&snapshot);
        let md = compose_analysis(&snapshot, &risk, &alerts, &context(MarketRegime::Normal));

        assert!(md.contains("**1. Observations**"));
        assert!(md.contains("**2. Risks**"));
        assert!(md.contains("**3. Actions**"));
        assert!(md.contains("**4. Mentor's Note**"));
        assert!(md.contains("Overall Risk Profile: **Moderate**."));
    }

    #[test]
    fn stress_regime_changes_guidance() {
        let snapshot = PortfolioSnapshot::disconnected();
        let risk = calculate_risk_score(&snapshot);
        let md = compose_analysis(&snapshot, &risk, &[], &context(MarketRegime::StagflationRisk));
        assert!(md.contains("Macro Stress"));
        assert!(md.contains("hedging"));
    }
}
