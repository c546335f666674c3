// In crates/strategies/src/lib.rs

use core_types::PriceSample;
pub mod ema;
pub mod ema_trend;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use ema_trend::EmaTrend;
pub use types::Assessment;

/// The universal interface for a trading strategy.
///
/// A strategy inspects an ordered (oldest first) series of price samples and
/// produces an `Assessment`. Strategies are stateless between calls so a single
/// instance can serve concurrent alerts.
pub trait Strategy: Send + Sync {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// The fewest samples `assess` accepts.
    fn min_samples(&self) -> usize;

    fn assess(&self, samples: &[PriceSample]) -> Result<Assessment>;
}
