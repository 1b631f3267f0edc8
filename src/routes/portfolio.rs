use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::models::{ConcentrationAlert, PortfolioSnapshot, RiskAssessment};
use crate::services::{market_service, portfolio_service, risk_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/portfolio", get(portfolio))
        .route("/portfolio/risk", get(portfolio_risk))
        .route("/portfolio/alerts", get(portfolio_alerts))
}

#[derive(Debug, Serialize)]
struct PortfolioResponse {
    #[serde(flatten)]
    snapshot: PortfolioSnapshot,
    /// Regime-derived headline status for the dashboard
    risk_status: &'static str,
}

/// GET /portfolio
///
/// Aggregated holdings plus a regime-derived risk status
async fn portfolio(State(state): State<AppState>) -> Json<PortfolioResponse> {
    let snapshot = portfolio_service::portfolio_summary(state.broker.as_ref()).await;
    let signals = state.market_data.macro_signals().await;
    let regime = market_service::determine_regime(&signals);

    Json(PortfolioResponse {
        snapshot,
        risk_status: regime.risk_status(),
    })
}

/// GET /portfolio/risk
async fn portfolio_risk(State(state): State<AppState>) -> Json<RiskAssessment> {
    let snapshot = portfolio_service::portfolio_summary(state.broker.as_ref()).await;
    Json(risk_service::calculate_risk_score(&snapshot))
}

/// GET /portfolio/alerts
async fn portfolio_alerts(State(state): State<AppState>) -> Json<Vec<ConcentrationAlert>> {
    let snapshot = portfolio_service::portfolio_summary(state.broker.as_ref()).await;
    Json(risk_service::check_concentration_alerts(&snapshot))
}
