// In crates/strategies/src/types.rs

use core_types::Signal;
use serde::Serialize;

/// The values a strategy compared to reach its signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assessment {
    pub signal: Signal,
    /// The most recent closing price.
    pub close: f64,
    /// The indicator value the close was compared against.
    pub ema: f64,
}
