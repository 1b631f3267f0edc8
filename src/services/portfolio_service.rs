use std::collections::BTreeMap;

use tracing::warn;

use crate::external::broker::{BrokerError, BrokerProvider, RawHolding};
use crate::models::{DataSource, Holding, PortfolioSnapshot};
use crate::services::sector_service;
use crate::utils::round2;

/// Fetch holdings and aggregate them into a snapshot.
///
/// Any broker failure (including a missing session) degrades to the
/// disconnected snapshot so downstream scoring never needs to special-case.
pub async fn portfolio_summary(broker: &dyn BrokerProvider) -> PortfolioSnapshot {
    match broker.fetch_holdings().await {
        Ok(raw) => summarize(raw),
        Err(BrokerError::NotConnected) => PortfolioSnapshot::disconnected(),
        Err(e) => {
            warn!("Failed to fetch holdings: {e}");
            PortfolioSnapshot::disconnected()
        }
    }
}

/// Enrich raw holdings with sectors and derive portfolio totals, day change
/// and per-sector allocation percentages. Zero denominators yield zero.
pub fn summarize(raw: Vec<RawHolding>) -> PortfolioSnapshot {
    let mut total_value = 0.0;
    let mut total_unrealized_pnl = 0.0;
    let mut total_day_change = 0.0;
    let mut sector_value: BTreeMap<String, f64> = BTreeMap::new();
    let mut holdings = Vec::with_capacity(raw.len());

    for h in raw {
        let quantity = h.quantity as f64;
        // fall back to last_price when the previous close is missing
        let close_price = if h.close_price > 0.0 {
            h.close_price
        } else {
            h.last_price
        };

        let value = h.last_price * quantity;
        let day_change = (h.last_price - close_price) * quantity;
        let day_change_percentage = if close_price > 0.0 {
            (h.last_price - close_price) / close_price * 100.0
        } else {
            0.0
        };

        total_value += value;
        total_unrealized_pnl += h.pnl;
        total_day_change += day_change;

        let sector = sector_service::sector_of(&h.tradingsymbol).to_string();
        *sector_value.entry(sector.clone()).or_insert(0.0) += value;

        holdings.push(Holding {
            tradingsymbol: h.tradingsymbol,
            quantity: h.quantity,
            last_price: h.last_price,
            average_price: h.average_price,
            pnl: round2(h.pnl),
            day_change: round2(day_change),
            day_change_percentage: round2(day_change_percentage),
            value: round2(value),
            sector,
        });
    }

    let sector_allocation = sector_value
        .into_iter()
        .map(|(sector, value)| {
            let pct = if total_value > 0.0 {
                round2(value / total_value * 100.0)
            } else {
                0.0
            };
            (sector, pct)
        })
        .collect();

    // denominator is the value at the start of the day
    let opening_value = total_value - total_day_change;
    let day_change_percentage = if opening_value > 0.0 {
        round2(total_day_change / opening_value * 100.0)
    } else {
        0.0
    };

    PortfolioSnapshot {
        total_value: round2(total_value),
        sector_allocation,
        holdings_count: holdings.len(),
        unrealized_pnl: round2(total_unrealized_pnl),
        day_change: round2(total_day_change),
        day_change_percentage,
        holdings,
        data_source: DataSource::Live,
    }
}
