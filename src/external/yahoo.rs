use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::external::signal_provider::{SignalProvider, SignalProviderError};
use crate::models::{MacroSignals, Trend};
use crate::utils::round2;

const DEFAULT_INDEX_TICKER: &str = "^NSEI";
const FETCH_TIMEOUT: Duration = Duration::from_secs(2);

/// Live macro signals derived from a benchmark index chart.
///
/// Only the index-driven fields are observable from this source: level,
/// peak-to-current drawdown, and a realized-volatility proxy for VIX.
/// Rate and commodity trends stay at their neutral defaults. The short
/// timeout keeps a slow upstream from stalling callers; the cache layer
/// falls back to neutral signals on any error.
pub struct YahooSignalProvider {
    client: reqwest::Client,
    index_ticker: String,
}

impl YahooSignalProvider {
    pub fn new(index_ticker: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .unwrap_or_default(),
            index_ticker: index_ticker.into(),
        }
    }

    pub fn from_env() -> Self {
        let ticker = std::env::var("MARKET_INDEX_TICKER")
            .unwrap_or_else(|_| DEFAULT_INDEX_TICKER.to_string());
        Self::new(ticker)
    }
}

// Minimal response structs (only what we need)
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Vec<Option<f64>>,
}

#[async_trait]
impl SignalProvider for YahooSignalProvider {
    async fn fetch_signals(&self) -> Result<MacroSignals, SignalProviderError> {
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}?range=3mo&interval=1d",
            self.index_ticker
        );

        let resp = self
            .client
            .get(url)
            .header("User-Agent", "Mozilla/5.0")
            .send()
            .await
            .map_err(|e| SignalProviderError::Network(e.to_string()))?;

        let body = resp
            .json::<YahooChartResponse>()
            .await
            .map_err(|e| SignalProviderError::Parse(e.to_string()))?;

        let closes: Vec<f64> = body
            .chart
            .result
            .and_then(|mut r| r.pop())
            .ok_or_else(|| SignalProviderError::BadResponse("missing result".into()))?
            .indicators
            .quote
            .first()
            .ok_or_else(|| SignalProviderError::BadResponse("missing quote".into()))?
            .close
            .iter()
            .flatten()
            .copied()
            .collect();

        signals_from_closes(&closes)
    }
}

/// Derive index level, drawdown and a realized-vol VIX proxy from a close
/// series (ascending by date).
fn signals_from_closes(closes: &[f64]) -> Result<MacroSignals, SignalProviderError> {
    if closes.len() < 2 {
        return Err(SignalProviderError::BadResponse(
            "insufficient close data".into(),
        ));
    }

    let last = closes[closes.len() - 1];
    let peak = closes.iter().copied().fold(f64::MIN, f64::max);
    let drawdown = if peak > 0.0 {
        (peak - last) / peak * 100.0
    } else {
        0.0
    };

    let mut returns = Vec::with_capacity(closes.len() - 1);
    for w in closes.windows(2) {
        if w[0] > 0.0 {
            returns.push((w[1] - w[0]) / w[0]);
        }
    }
    if returns.is_empty() {
        return Err(SignalProviderError::BadResponse("flat close data".into()));
    }

    // Annualized realized volatility stands in for an implied-vol index
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance =
        returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
    let vix_proxy = variance.sqrt() * (252.0_f64).sqrt() * 100.0;

    Ok(MacroSignals {
        vix: round2(vix_proxy),
        index_drawdown: round2(drawdown),
        interest_rates_trend: Trend::Stable,
        bond_yields_trend: Trend::Stable,
        oil_prices_trend: Trend::Stable,
        market_index: round2(last),
        is_simulated: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawdown_measured_from_window_peak() {
        let closes = [100.0, 110.0, 104.5];
        let signals = signals_from_closes(&closes).unwrap();
        assert_eq!(signals.index_drawdown, 5.0);
        assert_eq!(signals.market_index, 104.5);
        assert!(!signals.is_simulated);
    }

    #[test]
    fn flat_series_has_no_stress() {
        let closes = [100.0; 30];
        let signals = signals_from_closes(&closes).unwrap();
        assert_eq!(signals.vix, 0.0);
        assert_eq!(signals.index_drawdown, 0.0);
    }

    #[test]
    fn too_short_series_is_rejected() {
        assert!(signals_from_closes(&[100.0]).is_err());
    }
}
