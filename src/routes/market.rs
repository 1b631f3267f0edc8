use axum::{extract::State, routing::get, Json, Router};

use crate::models::MarketContext;
use crate::services::market_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // /market/mood is the dashboard alias for /market-context
        .route("/market/mood", get(market_context))
        .route("/market-context", get(market_context))
}

/// Current market regime, the signals behind it, and sector impacts
async fn market_context(State(state): State<AppState>) -> Json<MarketContext> {
    Json(market_service::market_context(&state.market_data).await)
}
