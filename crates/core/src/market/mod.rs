pub mod noise;
pub mod simulated;
pub mod traits;
