use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::services::{market_service, narrative_service, portfolio_service, risk_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/ai-analysis", post(ai_analysis))
}

#[derive(Debug, Default, Deserialize)]
struct AiRequest {
    #[serde(default)]
    question: Option<String>,
}

#[derive(Debug, Serialize)]
struct AiAnalysisResponse {
    analysis: String,
}

/// POST /ai-analysis
///
/// Runs the full pipeline (snapshot, risk, alerts, regime) and renders the
/// mentor analysis. The question field is accepted for the chat surface but
/// the rules engine currently answers every request the same way.
async fn ai_analysis(
    State(state): State<AppState>,
    body: Option<Json<AiRequest>>,
) -> Json<AiAnalysisResponse> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    if let Some(question) = &request.question {
        info!("ai-analysis question received: {question}");
    }

    let snapshot = portfolio_service::portfolio_summary(state.broker.as_ref()).await;
    let risk = risk_service::calculate_risk_score(&snapshot);
    let alerts = risk_service::check_concentration_alerts(&snapshot);
    let context = market_service::market_context(&state.market_data).await;

    let analysis = narrative_service::compose_analysis(&snapshot, &risk, &alerts, &context);
    Json(AiAnalysisResponse { analysis })
}
