use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::time::Instant;

use crate::errors::CoreError;
use crate::market::noise::NoiseSource;
use crate::market::traits::MarketDataProvider;
use crate::models::quote::{FinancialSnapshot, PriceQuote, PriceRequest};

/// How long a cached payload stays fresh before the next access recomputes it.
const CACHE_TTL: Duration = Duration::from_secs(30);

/// Maximum relative price movement per lookup (±3%).
const VOLATILITY: f64 = 0.03;

/// Lookups issued concurrently per batch.
const BATCH_SIZE: usize = 5;

/// Pause between consecutive batches (none after the last).
const BATCH_PAUSE: Duration = Duration::from_secs(1);

/// Simulated latency range for price lookups, in milliseconds.
const PRICE_LATENCY_MS: (u64, u64) = (200, 700);

/// Simulated latency range for financial lookups, in milliseconds.
const FINANCIAL_LATENCY_MS: (u64, u64) = (300, 1100);

struct CacheEntry<T> {
    value: T,
    fetched_at: Instant,
}

impl<T: Clone> CacheEntry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
        }
    }

    fn fresh_value(&self) -> Option<T> {
        (self.fetched_at.elapsed() < CACHE_TTL).then(|| self.value.clone())
    }
}

/// In-process market data simulator.
///
/// Stands in for a real exchange API: every lookup waits a randomized
/// latency, perturbs the caller's base figures, and caches the payload
/// for [`CACHE_TTL`]. Price and financial lookups are cached
/// independently, keyed by symbol. Stale entries are overwritten in
/// place on the next access.
///
/// Each instance owns its caches — construct one per dashboard (or per
/// test) instead of sharing a global.
pub struct SimulatedMarketFeed {
    noise: Box<dyn NoiseSource>,
    /// Probability in [0, 1] that a single lookup fails.
    failure_rate: f64,
    prices: Mutex<HashMap<String, CacheEntry<PriceQuote>>>,
    financials: Mutex<HashMap<String, CacheEntry<FinancialSnapshot>>>,
}

impl SimulatedMarketFeed {
    pub fn new(noise: Box<dyn NoiseSource>) -> Self {
        Self::with_failure_rate(noise, 0.0)
    }

    pub fn with_failure_rate(noise: Box<dyn NoiseSource>, failure_rate: f64) -> Self {
        Self {
            noise,
            failure_rate: failure_rate.clamp(0.0, 1.0),
            prices: Mutex::new(HashMap::new()),
            financials: Mutex::new(HashMap::new()),
        }
    }

    /// Uniform draw from [lo, hi].
    fn uniform(&self, lo: f64, hi: f64) -> f64 {
        lo + self.noise.sample() * (hi - lo)
    }

    async fn simulate_latency(&self, (lo_ms, hi_ms): (u64, u64)) {
        let millis = self.uniform(lo_ms as f64, hi_ms as f64) as u64;
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    fn roll_failure(&self) -> bool {
        self.failure_rate > 0.0 && self.noise.sample() < self.failure_rate
    }

    fn cached_price(&self, symbol: &str) -> Option<PriceQuote> {
        self.prices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(symbol)
            .and_then(CacheEntry::fresh_value)
    }

    fn cached_financials(&self, symbol: &str) -> Option<FinancialSnapshot> {
        self.financials
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(symbol)
            .and_then(CacheEntry::fresh_value)
    }

    fn store_price(&self, quote: PriceQuote) {
        self.prices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(quote.symbol.clone(), CacheEntry::new(quote));
    }

    fn store_financials(&self, snapshot: FinancialSnapshot) {
        self.financials
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(snapshot.symbol.clone(), CacheEntry::new(snapshot));
    }
}

#[async_trait]
impl MarketDataProvider for SimulatedMarketFeed {
    fn name(&self) -> &str {
        "SimulatedMarketFeed"
    }

    async fn fetch_current_price(
        &self,
        symbol: &str,
        base_price: f64,
    ) -> Result<PriceQuote, CoreError> {
        if let Some(quote) = self.cached_price(symbol) {
            log::debug!("price cache hit for {symbol}");
            return Ok(quote);
        }

        self.simulate_latency(PRICE_LATENCY_MS).await;

        if self.roll_failure() {
            return Err(CoreError::QuoteFetch(symbol.to_string()));
        }

        let movement = self.uniform(-VOLATILITY, VOLATILITY);
        let price = round2(base_price * (1.0 + movement));
        let change = price - base_price;
        let change_percent = if base_price > 0.0 {
            (change / base_price) * 100.0
        } else {
            0.0
        };

        let quote = PriceQuote {
            symbol: symbol.to_string(),
            price,
            change,
            change_percent,
            timestamp: Utc::now(),
        };
        self.store_price(quote.clone());
        Ok(quote)
    }

    async fn fetch_financial_data(
        &self,
        symbol: &str,
        base_pe: f64,
        base_earnings: f64,
    ) -> Result<FinancialSnapshot, CoreError> {
        if let Some(snapshot) = self.cached_financials(symbol) {
            log::debug!("financials cache hit for {symbol}");
            return Ok(snapshot);
        }

        self.simulate_latency(FINANCIAL_LATENCY_MS).await;

        if self.roll_failure() {
            return Err(CoreError::FinancialFetch(symbol.to_string()));
        }

        // P/E drifts by ±1, earnings by ±5% of the base figure.
        let pe_ratio = round2(base_pe + self.uniform(-1.0, 1.0));
        let latest_earnings = round2(base_earnings * (1.0 + self.uniform(-0.05, 0.05)));

        let snapshot = FinancialSnapshot {
            symbol: symbol.to_string(),
            pe_ratio,
            latest_earnings,
            timestamp: Utc::now(),
        };
        self.store_financials(snapshot.clone());
        Ok(snapshot)
    }

    async fn fetch_batch_prices(
        &self,
        requests: &[PriceRequest],
    ) -> Result<HashMap<String, f64>, CoreError> {
        let mut prices = HashMap::new();

        let mut chunks = requests.chunks(BATCH_SIZE).peekable();
        while let Some(chunk) = chunks.next() {
            let lookups: Vec<_> = chunk
                .iter()
                .map(|req| async move {
                    (
                        req.symbol.as_str(),
                        self.fetch_current_price(&req.symbol, req.base_price).await,
                    )
                })
                .collect();

            // Wait for every lookup in the batch to settle; failures
            // are dropped so the caller keeps its stale price.
            for (symbol, result) in futures::future::join_all(lookups).await {
                match result {
                    Ok(quote) => {
                        prices.insert(symbol.to_string(), quote.price);
                    }
                    Err(e) => log::warn!("dropping {symbol} from batch result: {e}"),
                }
            }

            if chunks.peek().is_some() {
                tokio::time::sleep(BATCH_PAUSE).await;
            }
        }

        Ok(prices)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
