use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single stock position in the portfolio.
///
/// The monetary fields (`investment`, `present_value`, `gain_loss`,
/// `gain_loss_percentage`) are always derived from price × quantity —
/// they are recomputed whenever the price changes, never edited directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub id: Uuid,

    /// Display name (e.g., "Reliance Industries Ltd.")
    pub name: String,

    /// Exchange ticker, uppercased (e.g., "RELIANCE")
    pub symbol: String,

    /// Sector label used for grouping (e.g., "IT", "Banking")
    pub sector: String,

    pub purchase_price: f64,
    pub quantity: f64,

    /// purchase_price × quantity
    pub investment: f64,

    /// Current market price (starts at the seed price, moved by refreshes)
    pub current_price: f64,

    /// current_price × quantity
    pub present_value: f64,

    /// present_value − investment
    pub gain_loss: f64,

    /// gain_loss / investment × 100, or 0 when investment is 0
    pub gain_loss_percentage: f64,

    pub pe_ratio: Option<f64>,
    pub latest_earnings: Option<f64>,

    /// Watch flag for positions under review (the "stage 2" marker).
    pub watchlisted: bool,

    /// Target sale price, if one has been set.
    pub sale_price: Option<f64>,
}

impl Holding {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        sector: impl Into<String>,
        purchase_price: f64,
        quantity: f64,
        current_price: f64,
    ) -> Self {
        let mut holding = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            symbol: symbol.into().to_uppercase(),
            sector: sector.into(),
            purchase_price,
            quantity,
            investment: 0.0,
            current_price,
            present_value: 0.0,
            gain_loss: 0.0,
            gain_loss_percentage: 0.0,
            pe_ratio: None,
            latest_earnings: None,
            watchlisted: false,
            sale_price: None,
        };
        holding.recompute();
        holding
    }

    /// Attach fundamentals (builder style, used by the seed data).
    #[must_use]
    pub fn with_fundamentals(mut self, pe_ratio: f64, latest_earnings: f64) -> Self {
        self.pe_ratio = Some(pe_ratio);
        self.latest_earnings = Some(latest_earnings);
        self
    }

    #[must_use]
    pub fn watchlist(mut self, watchlisted: bool) -> Self {
        self.watchlisted = watchlisted;
        self
    }

    #[must_use]
    pub fn with_sale_price(mut self, sale_price: f64) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    /// A copy of this holding at a new market price, with all derived
    /// fields recomputed. Used when merging refreshed prices.
    #[must_use]
    pub fn repriced(&self, new_price: f64) -> Self {
        let mut updated = self.clone();
        updated.current_price = new_price;
        updated.recompute();
        updated
    }

    /// A copy of this holding with refreshed fundamentals.
    #[must_use]
    pub fn refundamented(&self, pe_ratio: f64, latest_earnings: f64) -> Self {
        let mut updated = self.clone();
        updated.pe_ratio = Some(pe_ratio);
        updated.latest_earnings = Some(latest_earnings);
        updated
    }

    fn recompute(&mut self) {
        self.investment = self.purchase_price * self.quantity;
        self.present_value = self.current_price * self.quantity;
        self.gain_loss = self.present_value - self.investment;
        self.gain_loss_percentage = if self.investment > 0.0 {
            (self.gain_loss / self.investment) * 100.0
        } else {
            0.0
        };
    }
}
