mod app;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;
mod utils;

use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Duration;
use tokio::net::TcpListener;

use crate::external::broker::{BrokerProvider, DisconnectedBroker};
use crate::external::signal_provider::SignalProvider;
use crate::external::simulated::SimulatedSignalProvider;
use crate::external::yahoo::YahooSignalProvider;
use crate::services::intelligence_service::StockIntelligenceService;
use crate::services::job_scheduler_service::{JobContext, JobSchedulerService};
use crate::services::market_data::{self, MarketDataService};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    logging::init_logging(logging::LoggingConfig::from_env())?;

    // Select macro signal source based on SIGNAL_PROVIDER (defaults to simulated)
    let provider_name =
        std::env::var("SIGNAL_PROVIDER").unwrap_or_else(|_| "simulated".to_string());
    let signal_provider: Arc<dyn SignalProvider> = match provider_name.to_lowercase().as_str() {
        "simulated" => {
            tracing::info!("Using macro signal provider: simulated");
            Arc::new(SimulatedSignalProvider)
        }
        "yahoo" => {
            tracing::info!("Using macro signal provider: Yahoo index chart");
            Arc::new(YahooSignalProvider::from_env())
        }
        _ => {
            panic!(
                "Invalid SIGNAL_PROVIDER: {}. Must be 'simulated' or 'yahoo'",
                provider_name
            );
        }
    };

    let ttl_minutes = std::env::var("MARKET_CACHE_TTL_MINUTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(market_data::DEFAULT_TTL_MINUTES);
    let market_data = Arc::new(MarketDataService::new(
        signal_provider,
        Duration::minutes(ttl_minutes),
    ));

    // Broker OAuth flow lives elsewhere; without a session the backend
    // serves the disconnected shape end to end.
    let broker: Arc<dyn BrokerProvider> = Arc::new(DisconnectedBroker);

    let state = AppState {
        broker: broker.clone(),
        market_data: market_data.clone(),
        intelligence: Arc::new(StockIntelligenceService::new()),
    };

    let mut scheduler = JobSchedulerService::new(JobContext {
        broker,
        market_data,
    })
    .await?;
    scheduler.start().await?;

    let app = app::create_app(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Portfolio Brain backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
