use crate::models::holding::Holding;

/// The fixed startup portfolio: NSE-listed holdings across five
/// sectors. Current prices start at the last session's close and are
/// moved by the simulated feed from the first refresh onward.
#[must_use]
pub fn seed_holdings() -> Vec<Holding> {
    vec![
        Holding::new(
            "Tata Consultancy Services Ltd.",
            "TCS",
            "IT",
            3320.00,
            8.0,
            3565.25,
        )
        .with_fundamentals(30.1, 115.2),
        Holding::new("Infosys Ltd.", "INFY", "IT", 1480.00, 15.0, 1392.40)
            .with_fundamentals(24.7, 59.9)
            .watchlist(true),
        Holding::new("Wipro Ltd.", "WIPRO", "IT", 452.00, 30.0, 489.20),
        Holding::new("HDFC Bank Ltd.", "HDFCBANK", "Banking", 1545.00, 12.0, 1689.30)
            .with_fundamentals(19.8, 82.4),
        Holding::new("ICICI Bank Ltd.", "ICICIBANK", "Banking", 945.00, 20.0, 1122.85)
            .with_fundamentals(18.2, 58.3),
        Holding::new("Tata Motors Ltd.", "TATAMOTORS", "Auto", 612.00, 25.0, 948.60)
            .with_fundamentals(17.5, 36.1)
            .with_sale_price(1050.00),
        Holding::new("Mahindra & Mahindra Ltd.", "M&M", "Auto", 1380.00, 10.0, 2105.40)
            .with_fundamentals(25.3, 88.7),
        Holding::new(
            "Sun Pharmaceutical Industries Ltd.",
            "SUNPHARMA",
            "Pharma",
            1050.00,
            14.0,
            1485.75,
        )
        .with_fundamentals(34.6, 40.2),
        Holding::new("Cipla Ltd.", "CIPLA", "Pharma", 980.00, 12.0, 1452.30)
            .with_fundamentals(27.9, 43.5)
            .watchlist(true),
        Holding::new(
            "Reliance Industries Ltd.",
            "RELIANCE",
            "Energy",
            2450.00,
            10.0,
            2680.50,
        )
        .with_fundamentals(28.4, 98.6),
    ]
}
