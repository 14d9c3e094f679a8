use serde::{Deserialize, Serialize};

use super::holding::Holding;

/// Totals for one sector group.
///
/// `holdings` keeps the order in which the members appeared in the
/// input list; the sector list itself keeps first-seen sector order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorAggregate {
    pub sector: String,
    pub total_investment: f64,
    pub total_present_value: f64,
    pub total_gain_loss: f64,
    pub gain_loss_percentage: f64,
    pub holdings: Vec<Holding>,
}

/// The full dashboard payload: every holding, the per-sector groups,
/// and the portfolio-wide totals. Rebuilt from scratch on every
/// refresh cycle, never mutated in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioAggregate {
    pub holdings: Vec<Holding>,
    pub sectors: Vec<SectorAggregate>,
    pub total_investment: f64,
    pub total_present_value: f64,
    pub total_gain_loss: f64,
    pub total_gain_loss_percentage: f64,
}

impl PortfolioAggregate {
    /// Look up the aggregate for a sector by label.
    #[must_use]
    pub fn sector(&self, label: &str) -> Option<&SectorAggregate> {
        self.sectors.iter().find(|s| s.sector == label)
    }
}
