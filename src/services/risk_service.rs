use crate::models::{
    AlertKind, ConcentrationAlert, PortfolioSnapshot, RiskAssessment, RiskLabel, RiskMetrics,
};
use crate::utils::{round1, round2};

/// Compute the weighted 0-100 risk score with explainable reasons.
///
/// Pure function of the snapshot: deterministic, no I/O. A disconnected or
/// empty portfolio degrades every sub-score to its safe floor instead of
/// failing.
///
/// Formula breakdown:
/// - Sector concentration (max 30)
/// - Top-5 holdings concentration (max 28)
/// - Diversification count (max 18)
/// - Drawdown sensitivity proxy (max 15)
pub fn calculate_risk_score(snapshot: &PortfolioSnapshot) -> RiskAssessment {
    let (top_sector, top_sector_pct) = dominant_sector(snapshot);
    let top_5_pct = top_five_pct(snapshot);

    let sector_risk = sector_concentration_risk(top_sector_pct);
    let concentration_risk = top_holdings_risk(top_5_pct);
    let diversification = diversification_risk(snapshot.holdings_count);
    let drawdown = drawdown_sensitivity(sector_risk, concentration_risk);

    let risk_score = sector_risk + concentration_risk + diversification + drawdown;

    let mut reasons = Vec::new();
    if top_sector_pct > 25.0 {
        if let Some(sector) = top_sector {
            reasons.push(format!(
                "{} sector exposure at {}%",
                sector,
                top_sector_pct.round() as i64
            ));
        }
    }
    if top_5_pct > 40.0 {
        reasons.push(format!(
            "Top 5 stocks control {}% of portfolio",
            top_5_pct.round() as i64
        ));
    }
    if snapshot.holdings_count < 15 {
        reasons.push(format!(
            "Low diversification ({} holdings)",
            snapshot.holdings_count
        ));
    }
    if reasons.is_empty() {
        reasons.push("Balanced portfolio structure".to_string());
    }

    RiskAssessment {
        risk_score,
        risk_label: RiskLabel::from_score(risk_score),
        risk_reasons: reasons,
        metrics: RiskMetrics {
            top_sector_pct: round2(top_sector_pct),
            top_5_stock_pct: round2(top_5_pct),
            holdings_count: snapshot.holdings_count,
        },
    }
}

/// Flag individual positions and sectors above the fixed concentration
/// thresholds. Holdings pass first, then sectors; both strict (`>`), no
/// cross-suppression. Empty when the portfolio has no value.
pub fn check_concentration_alerts(snapshot: &PortfolioSnapshot) -> Vec<ConcentrationAlert> {
    let mut alerts = Vec::new();
    if snapshot.total_value == 0.0 {
        return alerts;
    }

    for holding in &snapshot.holdings {
        let pct = holding.value / snapshot.total_value * 100.0;
        if pct > 15.0 {
            let pct = round1(pct);
            alerts.push(ConcentrationAlert {
                kind: AlertKind::Stock,
                symbol: holding.tradingsymbol.clone(),
                value: pct,
                message: format!(
                    "{} is {}% of portfolio (>15%)",
                    holding.tradingsymbol, pct
                ),
            });
        }
    }

    for (sector, &pct) in &snapshot.sector_allocation {
        if pct > 25.0 {
            let pct = round1(pct);
            alerts.push(ConcentrationAlert {
                kind: AlertKind::Sector,
                symbol: sector.clone(),
                value: pct,
                message: format!("{} sector is {}% of portfolio (>25%)", sector, pct),
            });
        }
    }

    alerts
}

/// Largest single-sector allocation. First entry wins on exact ties.
fn dominant_sector(snapshot: &PortfolioSnapshot) -> (Option<&str>, f64) {
    let mut best: Option<(&str, f64)> = None;
    for (sector, &pct) in &snapshot.sector_allocation {
        match best {
            Some((_, top)) if top >= pct => {}
            _ => best = Some((sector, pct)),
        }
    }
    (best.map(|(s, _)| s), best.map(|(_, p)| p).unwrap_or(0.0))
}

/// Share of total value held by the five largest positions
fn top_five_pct(snapshot: &PortfolioSnapshot) -> f64 {
    if snapshot.total_value <= 0.0 {
        return 0.0;
    }
    let mut values: Vec<f64> = snapshot.holdings.iter().map(|h| h.value).collect();
    values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    let top_5: f64 = values.iter().take(5).sum();
    top_5 / snapshot.total_value * 100.0
}

fn sector_concentration_risk(top_sector_pct: f64) -> u32 {
    if top_sector_pct <= 20.0 {
        5
    } else if top_sector_pct <= 30.0 {
        15
    } else {
        30
    }
}

fn top_holdings_risk(top_5_pct: f64) -> u32 {
    if top_5_pct <= 35.0 {
        8
    } else if top_5_pct <= 45.0 {
        18
    } else {
        28
    }
}

fn diversification_risk(holdings_count: usize) -> u32 {
    if holdings_count >= 25 {
        5
    } else if holdings_count >= 15 {
        12
    } else {
        18
    }
}

/// Derived proxy, not an independent signal
fn drawdown_sensitivity(sector_risk: u32, concentration_risk: u32) -> u32 {
    15.min(((sector_risk + concentration_risk) as f64 * 0.25) as u32)
}
