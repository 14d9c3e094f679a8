use std::collections::HashMap;

use crate::models::aggregate::{PortfolioAggregate, SectorAggregate};
use crate::models::holding::Holding;

/// Computes sector and portfolio totals from a list of holdings.
///
/// Pure business logic — no I/O, no shared state. Always succeeds:
/// empty input produces zeroed totals and an empty sector list.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// Group holdings by sector and compute per-sector and
    /// portfolio-wide investment, present value, gain/loss, and
    /// percentage. Grouping is stable: sectors appear in first-seen
    /// order and holdings keep their input order within each sector.
    #[must_use]
    pub fn aggregate(&self, holdings: &[Holding]) -> PortfolioAggregate {
        let mut sector_index: HashMap<&str, usize> = HashMap::new();
        let mut sectors: Vec<SectorAggregate> = Vec::new();

        for holding in holdings {
            let idx = *sector_index
                .entry(holding.sector.as_str())
                .or_insert_with(|| {
                    sectors.push(SectorAggregate {
                        sector: holding.sector.clone(),
                        total_investment: 0.0,
                        total_present_value: 0.0,
                        total_gain_loss: 0.0,
                        gain_loss_percentage: 0.0,
                        holdings: Vec::new(),
                    });
                    sectors.len() - 1
                });

            let sector = &mut sectors[idx];
            sector.total_investment += holding.investment;
            sector.total_present_value += holding.present_value;
            sector.holdings.push(holding.clone());
        }

        for sector in &mut sectors {
            sector.total_gain_loss = sector.total_present_value - sector.total_investment;
            sector.gain_loss_percentage =
                gain_loss_percentage(sector.total_gain_loss, sector.total_investment);
        }

        let total_investment: f64 = holdings.iter().map(|h| h.investment).sum();
        let total_present_value: f64 = holdings.iter().map(|h| h.present_value).sum();
        let total_gain_loss = total_present_value - total_investment;

        PortfolioAggregate {
            holdings: holdings.to_vec(),
            sectors,
            total_investment,
            total_present_value,
            total_gain_loss,
            total_gain_loss_percentage: gain_loss_percentage(total_gain_loss, total_investment),
        }
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}

fn gain_loss_percentage(gain_loss: f64, investment: f64) -> f64 {
    if investment > 0.0 {
        (gain_loss / investment) * 100.0
    } else {
        0.0
    }
}
