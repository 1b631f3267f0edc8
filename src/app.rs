use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::routes::{analysis, health, market, portfolio, stocks};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    // Frontend access from any origin, matching the dashboard deployment
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::<AppState>::new()
        .nest("/health", health::router())
        .merge(market::router())
        .merge(portfolio::router())
        .merge(analysis::router())
        .merge(stocks::router())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::broker::DisconnectedBroker;
    use crate::external::simulated::SimulatedSignalProvider;
    use crate::services::intelligence_service::StockIntelligenceService;
    use crate::services::market_data::MarketDataService;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let state = AppState {
            broker: Arc::new(DisconnectedBroker),
            market_data: Arc::new(MarketDataService::with_default_ttl(Arc::new(
                SimulatedSignalProvider,
            ))),
            intelligence: Arc::new(StockIntelligenceService::new()),
        };
        create_app(state)
    }

    async fn get_json(app: Router, uri: &str) -> serde_json::Value {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_check() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn market_context_has_regime_signals_and_impacts() {
        let json = get_json(test_app(), "/market-context").await;
        let regime = json["regime"].as_str().unwrap();
        assert!(
            ["NORMAL", "ELEVATED_VOLATILITY", "STAGFLATION_RISK"].contains(&regime),
            "unexpected regime {regime}"
        );
        assert!(json["signals"]["vix"].is_number());
        assert!(json["impact_map"].is_object());
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn market_mood_is_an_alias() {
        let json = get_json(test_app(), "/market/mood").await;
        assert!(json["regime"].is_string());
    }

    #[tokio::test]
    async fn disconnected_portfolio_is_served_not_failed() {
        let json = get_json(test_app(), "/portfolio").await;
        assert_eq!(json["total_value"], 0.0);
        assert_eq!(json["data_source"], "DISCONNECTED");
        assert!(["Low", "Moderate", "High"]
            .contains(&json["risk_status"].as_str().unwrap()));
    }

    #[tokio::test]
    async fn portfolio_risk_for_empty_portfolio() {
        let json = get_json(test_app(), "/portfolio/risk").await;
        assert_eq!(json["risk_score"], 34);
        assert_eq!(json["risk_label"], "Moderate");
        assert!(!json["risk_reasons"].as_array().unwrap().is_empty());
        assert_eq!(json["metrics"]["holdings_count"], 0);
    }

    #[tokio::test]
    async fn portfolio_alerts_empty_when_disconnected() {
        let json = get_json(test_app(), "/portfolio/alerts").await;
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn ai_analysis_accepts_empty_body() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/ai-analysis")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let analysis = json["analysis"].as_str().unwrap();
        assert!(analysis.contains("**1. Observations**"));
        assert!(analysis.contains("**4. Mentor's Note**"));
    }

    #[tokio::test]
    async fn invalid_stock_symbol_is_rejected() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/stock/not%20a%20symbol/intelligence")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
