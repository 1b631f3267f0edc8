use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tracing::warn;

use crate::external::signal_provider::SignalProvider;
use crate::models::MacroSignals;

pub const DEFAULT_TTL_MINUTES: i64 = 15;

struct CachedSignals {
    signals: MacroSignals,
    last_updated: DateTime<Utc>,
}

/// Process-wide macro signal cache in front of a signal provider.
///
/// Reads are concurrent; the write lock is only taken to store a freshly
/// regenerated value. Concurrent cache-miss callers may each regenerate —
/// regeneration is side-effect-free, so that is only redundant work.
/// A provider failure degrades to neutral defaults; callers never see an
/// error and are never served a value older than the TTL.
pub struct MarketDataService {
    provider: Arc<dyn SignalProvider>,
    cache: RwLock<Option<CachedSignals>>,
    ttl: Duration,
}

impl MarketDataService {
    pub fn new(provider: Arc<dyn SignalProvider>, ttl: Duration) -> Self {
        Self {
            provider,
            cache: RwLock::new(None),
            ttl,
        }
    }

    pub fn with_default_ttl(provider: Arc<dyn SignalProvider>) -> Self {
        Self::new(provider, Duration::minutes(DEFAULT_TTL_MINUTES))
    }

    /// Serve the cached snapshot when fresh, otherwise regenerate and store
    /// it with a new timestamp.
    pub async fn macro_signals(&self) -> MacroSignals {
        if let Some(cached) = self.fresh() {
            return cached;
        }

        let signals = match self.provider.fetch_signals().await {
            Ok(signals) => signals,
            Err(e) => {
                warn!("Macro signal fetch failed, serving neutral defaults: {e}");
                MacroSignals::default()
            }
        };

        *self.cache.write() = Some(CachedSignals {
            signals: signals.clone(),
            last_updated: Utc::now(),
        });
        signals
    }

    fn fresh(&self) -> Option<MacroSignals> {
        let guard = self.cache.read();
        let cached = guard.as_ref()?;
        if Utc::now() - cached.last_updated < self.ttl {
            Some(cached.signals.clone())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::signal_provider::SignalProviderError;
    use crate::models::Trend;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a distinct vix on every call so staleness is observable
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SignalProvider for CountingProvider {
        async fn fetch_signals(&self) -> Result<MacroSignals, SignalProviderError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(MacroSignals {
                vix: 10.0 + n as f64,
                ..MacroSignals::default()
            })
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl SignalProvider for FailingProvider {
        async fn fetch_signals(&self) -> Result<MacroSignals, SignalProviderError> {
            Err(SignalProviderError::Network("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn calls_within_ttl_return_identical_signals() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let service = MarketDataService::new(provider.clone(), Duration::minutes(15));

        let first = service.macro_signals().await;
        let second = service.macro_signals().await;
        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_cache_regenerates() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let service = MarketDataService::new(provider.clone(), Duration::zero());

        let first = service.macro_signals().await;
        let second = service.macro_signals().await;
        assert_ne!(first.vix, second.vix);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_neutral_defaults() {
        let service =
            MarketDataService::new(Arc::new(FailingProvider), Duration::minutes(15));
        let signals = service.macro_signals().await;
        assert_eq!(signals.vix, 15.0);
        assert_eq!(signals.index_drawdown, 0.0);
        assert_eq!(signals.interest_rates_trend, Trend::Stable);
        assert!(signals.is_simulated);
    }
}
