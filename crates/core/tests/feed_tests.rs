// ═══════════════════════════════════════════════════════════════════
// Simulated market feed tests — price movement, caching window,
// batching & throttling, simulated failures
// ═══════════════════════════════════════════════════════════════════

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use portfolio_dashboard_core::market::noise::{NoiseSource, ThreadRngNoise};
use portfolio_dashboard_core::market::simulated::SimulatedMarketFeed;
use portfolio_dashboard_core::market::traits::MarketDataProvider;
use portfolio_dashboard_core::models::quote::PriceRequest;

// ═══════════════════════════════════════════════════════════════════
// Noise doubles
// ═══════════════════════════════════════════════════════════════════

/// Every draw returns the same sample.
struct FixedNoise(f64);

impl NoiseSource for FixedNoise {
    fn sample(&self) -> f64 {
        self.0
    }
}

/// Draws are consumed from a fixed script, in order.
struct ScriptedNoise(Mutex<VecDeque<f64>>);

impl ScriptedNoise {
    fn new(samples: &[f64]) -> Self {
        Self(Mutex::new(samples.iter().copied().collect()))
    }
}

impl NoiseSource for ScriptedNoise {
    fn sample(&self) -> f64 {
        self.0
            .lock()
            .unwrap()
            .pop_front()
            .expect("noise script exhausted")
    }
}

fn fixed_feed(sample: f64) -> SimulatedMarketFeed {
    SimulatedMarketFeed::new(Box::new(FixedNoise(sample)))
}

fn requests(count: usize) -> Vec<PriceRequest> {
    (0..count)
        .map(|i| PriceRequest::new(format!("SYM{i}"), 100.0 + i as f64))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════
// Price lookups
// ═══════════════════════════════════════════════════════════════════

mod prices {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn movement_is_pinned_by_noise() {
        // sample 1.0 → +3% movement, the top of the band
        let feed = fixed_feed(1.0);
        let quote = feed.fetch_current_price("TCS", 100.0).await.unwrap();

        assert_eq!(quote.price, 103.0);
        assert_eq!(quote.change, 3.0);
        assert!((quote.change_percent - 3.0).abs() < 1e-9);
        assert_eq!(quote.symbol, "TCS");

        // sample 0.0 → -3%
        let feed = fixed_feed(0.0);
        let quote = feed.fetch_current_price("TCS", 100.0).await.unwrap();
        assert_eq!(quote.price, 97.0);
    }

    #[tokio::test(start_paused = true)]
    async fn price_stays_within_volatility_band() {
        for _ in 0..25 {
            // Fresh feed each round so the cache never short-circuits
            let feed = SimulatedMarketFeed::new(Box::new(ThreadRngNoise));
            let quote = feed.fetch_current_price("RELIANCE", 250.0).await.unwrap();

            assert!(
                quote.price >= 242.49 && quote.price <= 257.51,
                "price {} outside ±3% of 250",
                quote.price
            );
            // Rounded to 2 decimals
            assert!(((quote.price * 100.0).round() - quote.price * 100.0).abs() < 1e-9);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn zero_base_price_has_zero_change_percent() {
        let feed = fixed_feed(1.0);
        let quote = feed.fetch_current_price("JUNK", 0.0).await.unwrap();

        assert_eq!(quote.price, 0.0);
        assert_eq!(quote.change_percent, 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Caching window
// ═══════════════════════════════════════════════════════════════════

mod cache {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn served_verbatim_within_window() {
        let feed = fixed_feed(0.5);

        let first = feed.fetch_current_price("TCS", 100.0).await.unwrap();
        tokio::time::advance(Duration::from_secs(29)).await;

        // A different base price makes no difference while cached
        let second = feed.fetch_current_price("TCS", 999.0).await.unwrap();
        assert_eq!(second, first);
    }

    #[tokio::test(start_paused = true)]
    async fn recomputed_after_window_elapses() {
        let feed = fixed_feed(0.5);

        let first = feed.fetch_current_price("TCS", 100.0).await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;

        let second = feed.fetch_current_price("TCS", 200.0).await.unwrap();
        assert_eq!(second.price, 200.0, "stale entry must be recomputed");
        assert_ne!(second, first);
    }

    #[tokio::test(start_paused = true)]
    async fn price_and_financial_caches_are_independent() {
        let feed = fixed_feed(0.5);

        let quote = feed.fetch_current_price("TCS", 100.0).await.unwrap();
        let snapshot = feed.fetch_financial_data("TCS", 20.0, 50.0).await.unwrap();

        // Both stay cached under the same symbol without clobbering
        assert_eq!(feed.fetch_current_price("TCS", 1.0).await.unwrap(), quote);
        assert_eq!(
            feed.fetch_financial_data("TCS", 1.0, 1.0).await.unwrap(),
            snapshot
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// Financial data
// ═══════════════════════════════════════════════════════════════════

mod financials {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn noise_bounds_are_honored() {
        // sample 1.0 → P/E +1, earnings +5%
        let feed = fixed_feed(1.0);
        let snapshot = feed.fetch_financial_data("INFY", 20.0, 50.0).await.unwrap();
        assert_eq!(snapshot.pe_ratio, 21.0);
        assert_eq!(snapshot.latest_earnings, 52.5);

        // sample 0.0 → P/E -1, earnings -5%
        let feed = fixed_feed(0.0);
        let snapshot = feed.fetch_financial_data("INFY", 20.0, 50.0).await.unwrap();
        assert_eq!(snapshot.pe_ratio, 19.0);
        assert_eq!(snapshot.latest_earnings, 47.5);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_is_reported_per_symbol() {
        let feed =
            SimulatedMarketFeed::with_failure_rate(Box::new(FixedNoise(0.5)), 1.0);
        let err = feed.fetch_financial_data("INFY", 20.0, 50.0).await.unwrap_err();
        assert!(err.to_string().contains("INFY"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Batching & throttling
// ═══════════════════════════════════════════════════════════════════

mod batching {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn twelve_symbols_run_as_three_batches() {
        // Fixed sample 0.5 pins each lookup's latency at 450ms, so the
        // schedule is three 450ms batches plus two 1s pauses.
        let feed = fixed_feed(0.5);
        let input = requests(12);

        let start = tokio::time::Instant::now();
        let prices = feed.fetch_batch_prices(&input).await.unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed >= Duration::from_millis(3350) && elapsed < Duration::from_millis(3600),
            "unexpected batch schedule: {elapsed:?}"
        );
        assert_eq!(prices.len(), 12);
    }

    #[tokio::test(start_paused = true)]
    async fn no_pause_after_the_last_batch() {
        let feed = fixed_feed(0.5);
        let input = requests(5);

        let start = tokio::time::Instant::now();
        feed.fetch_batch_prices(&input).await.unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(1000),
            "single batch must not pay the inter-batch pause: {elapsed:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn result_keys_are_a_subset_of_the_input() {
        let feed = fixed_feed(0.5);
        let input = requests(12);
        let symbols: HashSet<String> = input.iter().map(|r| r.symbol.clone()).collect();

        let prices = feed.fetch_batch_prices(&input).await.unwrap();

        assert!(prices.keys().all(|s| symbols.contains(s)));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_lookups_are_silently_omitted() {
        let feed =
            SimulatedMarketFeed::with_failure_rate(Box::new(FixedNoise(0.5)), 1.0);

        let prices = feed.fetch_batch_prices(&requests(12)).await.unwrap();

        // Every lookup failed, yet the batch itself still resolved
        assert!(prices.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn partial_failure_keeps_the_survivors() {
        // Script, in consumption order: both latencies (0.5 → 450ms),
        // then AAA's failure roll (0.9 ≥ 0.5 → succeeds) and movement
        // (1.0 → +3%), then BBB's failure roll (0.1 < 0.5 → fails).
        let noise = ScriptedNoise::new(&[0.5, 0.5, 0.9, 1.0, 0.1]);
        let feed = SimulatedMarketFeed::with_failure_rate(Box::new(noise), 0.5);

        let input = vec![
            PriceRequest::new("AAA", 100.0),
            PriceRequest::new("BBB", 100.0),
        ];
        let prices = feed.fetch_batch_prices(&input).await.unwrap();

        assert_eq!(prices.get("AAA"), Some(&103.0));
        assert!(!prices.contains_key("BBB"));
    }

    #[tokio::test(start_paused = true)]
    async fn cached_symbols_skip_the_simulated_latency() {
        let feed = fixed_feed(0.5);
        let input = requests(5);

        feed.fetch_batch_prices(&input).await.unwrap();

        // Second pass is answered from cache: no sleeps at all
        let start = tokio::time::Instant::now();
        let prices = feed.fetch_batch_prices(&input).await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(prices.len(), 5);
    }
}
