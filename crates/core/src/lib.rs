pub mod errors;
pub mod format;
pub mod market;
pub mod models;
pub mod seed;
pub mod services;

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use errors::CoreError;
use market::noise::ThreadRngNoise;
use market::simulated::SimulatedMarketFeed;
use market::traits::MarketDataProvider;
use models::aggregate::PortfolioAggregate;
use models::holding::Holding;
use services::metrics_service::MetricsService;
use services::refresh_service::RefreshService;

/// Cadence of scheduled refreshes.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(15);

/// Main entry point for the portfolio dashboard core.
///
/// Owns the holdings list, the market data provider, and the current
/// [`PortfolioAggregate`] the display surface renders. Each refresh
/// rebuilds the aggregate from scratch; a failed cycle leaves the last
/// good aggregate in place and records the error for the caller to
/// show with a retry affordance.
///
/// `refresh` takes `&mut self`, so overlapping refresh cycles cannot
/// be expressed — the caller never needs its own re-entrancy guard.
#[must_use]
pub struct PortfolioDashboard {
    holdings: Vec<Holding>,
    aggregate: PortfolioAggregate,
    refresh_service: RefreshService,
    metrics: MetricsService,
    last_updated: DateTime<Utc>,
    last_error: Option<String>,
}

impl std::fmt::Debug for PortfolioDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioDashboard")
            .field("holdings", &self.holdings.len())
            .field("sectors", &self.aggregate.sectors.len())
            .field("provider", &self.refresh_service.provider_name())
            .field("last_updated", &self.last_updated)
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl PortfolioDashboard {
    /// Build a dashboard over an explicit holdings list and provider.
    pub fn new(holdings: Vec<Holding>, provider: Box<dyn MarketDataProvider>) -> Self {
        let metrics = MetricsService::new();
        let aggregate = metrics.aggregate(&holdings);
        Self {
            holdings,
            aggregate,
            refresh_service: RefreshService::new(provider),
            metrics,
            last_updated: Utc::now(),
            last_error: None,
        }
    }

    /// The standard setup: seed holdings priced by a fresh simulated feed.
    pub fn with_seed_portfolio() -> Self {
        Self::new(
            seed::seed_holdings(),
            Box::new(SimulatedMarketFeed::new(Box::new(ThreadRngNoise))),
        )
    }

    // ── State accessors ─────────────────────────────────────────────

    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    #[must_use]
    pub fn aggregate(&self) -> &PortfolioAggregate {
        &self.aggregate
    }

    #[must_use]
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Message of the most recent failed refresh, cleared by the next
    /// successful one.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Refresh pipeline ────────────────────────────────────────────

    /// Run one refresh cycle: batch-fetch current prices, merge them
    /// into the holdings, and rebuild the aggregate.
    ///
    /// Symbols the provider dropped keep their stale price. If the
    /// whole cycle fails, the previous aggregate stays visible and the
    /// error is recorded; a later call retries from the same state.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        match self.refresh_service.refresh_cycle(&self.holdings).await {
            Ok(updated) => {
                self.holdings = updated;
                self.aggregate = self.metrics.aggregate(&self.holdings);
                self.last_updated = Utc::now();
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Refresh P/E and earnings figures. Per-symbol failures keep the
    /// stale fundamentals, so this never fails as a whole.
    pub async fn refresh_financials(&mut self) {
        self.holdings = self.refresh_service.refresh_financials(&self.holdings).await;
        self.aggregate = self.metrics.aggregate(&self.holdings);
    }

    /// Drive scheduled refreshes every [`REFRESH_INTERVAL`] until the
    /// shutdown channel fires (or its sender is dropped).
    ///
    /// The interval's immediate first tick is consumed up front — the
    /// aggregate built at construction is already current, so the first
    /// real cycle runs one full interval in.
    pub async fn run_auto_refresh(&mut self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(REFRESH_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.refresh().await {
                        log::error!("scheduled refresh failed: {e}");
                    }
                }
                _ = shutdown.changed() => break,
            }
        }
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Serialize the current aggregate as pretty JSON for the display
    /// surface.
    pub fn snapshot_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(&self.aggregate)?)
    }
}
