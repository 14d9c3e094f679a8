use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A current-price quote for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub symbol: String,

    /// Latest market price, rounded to 2 decimals.
    pub price: f64,

    /// Absolute movement against the base price of the lookup.
    pub change: f64,

    /// Relative movement in percent (0 when the base price is 0).
    pub change_percent: f64,

    pub timestamp: DateTime<Utc>,
}

/// Financial ratios for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub symbol: String,
    pub pe_ratio: f64,
    pub latest_earnings: f64,
    pub timestamp: DateTime<Utc>,
}

/// One element of a batch price lookup: the symbol to quote and the
/// price the simulated movement is applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRequest {
    pub symbol: String,
    pub base_price: f64,
}

impl PriceRequest {
    pub fn new(symbol: impl Into<String>, base_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            base_price,
        }
    }
}
