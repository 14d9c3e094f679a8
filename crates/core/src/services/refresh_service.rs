use crate::errors::CoreError;
use crate::market::traits::MarketDataProvider;
use crate::models::holding::Holding;
use crate::models::quote::PriceRequest;

/// Runs one price-refresh cycle against a market data provider.
///
/// Owns the provider instance so the caller decides whether it talks
/// to the simulated feed or something real.
pub struct RefreshService {
    provider: Box<dyn MarketDataProvider>,
}

impl RefreshService {
    pub fn new(provider: Box<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Fetch fresh prices for every holding and merge them in.
    ///
    /// The holding's current price is the base the next movement is
    /// applied to. Symbols missing from the batch result keep their
    /// stale price; derived fields are recomputed for the rest.
    pub async fn refresh_cycle(&self, holdings: &[Holding]) -> Result<Vec<Holding>, CoreError> {
        let requests: Vec<PriceRequest> = holdings
            .iter()
            .map(|h| PriceRequest::new(&h.symbol, h.current_price))
            .collect();

        let prices = self.provider.fetch_batch_prices(&requests).await?;
        log::debug!(
            "refresh cycle resolved {}/{} symbols via {}",
            prices.len(),
            holdings.len(),
            self.provider.name()
        );

        let updated = holdings
            .iter()
            .map(|holding| match prices.get(&holding.symbol) {
                Some(&price) => holding.repriced(price),
                None => holding.clone(),
            })
            .collect();

        Ok(updated)
    }

    /// Refresh P/E and earnings figures for holdings that carry them.
    ///
    /// Lookups run one at a time; a failed lookup keeps the stale
    /// fundamentals, and holdings without fundamentals pass through.
    pub async fn refresh_financials(&self, holdings: &[Holding]) -> Vec<Holding> {
        let mut updated = Vec::with_capacity(holdings.len());

        for holding in holdings {
            let (Some(pe), Some(earnings)) = (holding.pe_ratio, holding.latest_earnings) else {
                updated.push(holding.clone());
                continue;
            };

            match self
                .provider
                .fetch_financial_data(&holding.symbol, pe, earnings)
                .await
            {
                Ok(snapshot) => {
                    updated.push(holding.refundamented(snapshot.pe_ratio, snapshot.latest_earnings));
                }
                Err(e) => {
                    log::warn!("keeping stale fundamentals for {}: {e}", holding.symbol);
                    updated.push(holding.clone());
                }
            }
        }

        updated
    }
}
