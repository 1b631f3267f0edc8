use async_trait::async_trait;
use rand::Rng;

use crate::external::signal_provider::{SignalProvider, SignalProviderError};
use crate::models::{MacroSignals, Trend};
use crate::utils::round2;

/// Bounded-random macro signal generator.
///
/// Draws a stress level first so the individual signals stay internally
/// consistent: an elevated-VIX draw always comes with an elevated drawdown
/// and rising yields.
pub struct SimulatedSignalProvider;

#[async_trait]
impl SignalProvider for SimulatedSignalProvider {
    async fn fetch_signals(&self) -> Result<MacroSignals, SignalProviderError> {
        Ok(simulate_signals())
    }
}

pub(crate) fn simulate_signals() -> MacroSignals {
    let mut rng = rand::rng();

    // 60% calm, 30% caution, 10% panic
    let stress: f64 = rng.random();
    let (vix, drawdown, yield_trend) = if stress < 0.6 {
        (
            rng.random_range(11.0..16.0),
            rng.random_range(0.0..3.0),
            Trend::Stable,
        )
    } else if stress < 0.9 {
        (
            rng.random_range(17.0..22.0),
            rng.random_range(3.0..8.0),
            Trend::Up,
        )
    } else {
        (
            rng.random_range(23.0..35.0),
            rng.random_range(8.0..15.0),
            Trend::Up,
        )
    };

    let oil_trend = match rng.random_range(0..3) {
        0 => Trend::Up,
        1 => Trend::Down,
        _ => Trend::Stable,
    };

    MacroSignals {
        vix: round2(vix),
        index_drawdown: round2(drawdown),
        interest_rates_trend: Trend::Stable,
        bond_yields_trend: yield_trend,
        oil_prices_trend: oil_trend,
        market_index: 24500.0,
        is_simulated: true,
    }
}
