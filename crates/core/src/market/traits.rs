use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::quote::{FinancialSnapshot, PriceQuote, PriceRequest};

/// Trait abstraction for market data providers.
///
/// The dashboard only ever talks to this trait, so the simulated feed
/// can be swapped for a real exchange API (or a test mock) without
/// touching the refresh pipeline.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Get the current quote for one symbol. `base_price` is the last
    /// known price, which simulated providers move and real providers
    /// may use to compute the change fields.
    async fn fetch_current_price(
        &self,
        symbol: &str,
        base_price: f64,
    ) -> Result<PriceQuote, CoreError>;

    /// Get financial ratios for one symbol, perturbed around the last
    /// known P/E and earnings figures.
    async fn fetch_financial_data(
        &self,
        symbol: &str,
        base_pe: f64,
        base_earnings: f64,
    ) -> Result<FinancialSnapshot, CoreError>;

    /// Get current prices for many symbols, batched and throttled.
    ///
    /// The returned map contains only the symbols that resolved —
    /// individual lookup failures are dropped, not propagated. `Err`
    /// means the whole batch could not be issued at all.
    async fn fetch_batch_prices(
        &self,
        requests: &[PriceRequest],
    ) -> Result<HashMap<String, f64>, CoreError>;
}
