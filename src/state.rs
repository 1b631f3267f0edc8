use std::sync::Arc;

use crate::external::broker::BrokerProvider;
use crate::services::intelligence_service::StockIntelligenceService;
use crate::services::market_data::MarketDataService;

#[derive(Clone)]
pub struct AppState {
    pub broker: Arc<dyn BrokerProvider>,
    pub market_data: Arc<MarketDataService>,
    pub intelligence: Arc<StockIntelligenceService>,
}
