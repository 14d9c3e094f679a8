/// Source of uniform randomness for the market simulation.
///
/// Injected into the simulated feed so tests can pin exact price
/// movements, latencies, and failures.
pub trait NoiseSource: Send + Sync {
    /// Draw the next sample, uniform in [0, 1).
    fn sample(&self) -> f64;
}

/// Default source backed by the thread-local rng.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngNoise;

impl NoiseSource for ThreadRngNoise {
    fn sample(&self) -> f64 {
        rand::random::<f64>()
    }
}
