pub mod intelligence_service;
pub mod job_scheduler_service;
pub mod market_data;
pub mod market_service;
pub mod narrative_service;
pub mod portfolio_service;
pub mod risk_service;
pub mod sector_service;
