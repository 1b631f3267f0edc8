use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::errors::AppError;
use crate::external::broker::BrokerProvider;
use crate::services::market_data::MarketDataService;
use crate::services::{market_service, narrative_service, portfolio_service, risk_service};

/// Context passed to job functions
#[derive(Clone)]
pub struct JobContext {
    pub broker: Arc<dyn BrokerProvider>,
    pub market_data: Arc<MarketDataService>,
}

pub struct JobSchedulerService {
    scheduler: JobScheduler,
    context: JobContext,
}

impl JobSchedulerService {
    pub async fn new(context: JobContext) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::External(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler, context })
    }

    /// Schedule the daily analysis run and start the scheduler.
    pub async fn start(&mut self) -> Result<(), AppError> {
        info!("Starting job scheduler, daily analysis set for 09:20");

        let context = self.context.clone();
        // sec min hour day month weekday
        let job = Job::new_async("0 20 9 * * *", move |_uuid, _lock| {
            let context = context.clone();
            Box::pin(async move {
                daily_analysis(context).await;
            })
        })
        .map_err(|e| AppError::External(format!("Failed to create daily job: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::External(format!("Failed to add daily job: {e}")))?;
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::External(format!("Failed to start scheduler: {e}")))?;

        Ok(())
    }
}

/// Runs the full pipeline once and logs the insight. Shares no mutable
/// state with request handlers beyond the signal cache.
async fn daily_analysis(context: JobContext) {
    info!("Running daily portfolio analysis");

    let snapshot = portfolio_service::portfolio_summary(context.broker.as_ref()).await;
    let risk = risk_service::calculate_risk_score(&snapshot);
    let alerts = risk_service::check_concentration_alerts(&snapshot);
    let market = market_service::market_context(&context.market_data).await;

    if snapshot.holdings.is_empty() {
        error!("Daily analysis ran without a connected broker session");
    }

    let insight = narrative_service::compose_analysis(&snapshot, &risk, &alerts, &market);
    info!(
        risk_score = risk.risk_score,
        regime = ?market.regime,
        alert_count = alerts.len(),
        "Daily insight generated:\n{insight}"
    );
}
