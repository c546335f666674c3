// In crates/strategies/src/ema_trend.rs

use crate::ema::ema;
use crate::{Assessment, Error, Result, Strategy};
use core_types::{PriceSample, Signal};

/// The EMA window used by the Titan entry filter.
pub const EMA_PERIOD: usize = 13;

/// Trend filter: go long when the latest close is above its EMA, short when below.
///
/// A close exactly on the EMA has no direction and yields `Signal::Hold`.
#[derive(Debug, Clone)]
pub struct EmaTrend {
    period: usize,
}

impl EmaTrend {
    /// A zero period is accepted but never yields an EMA.
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for EmaTrend {
    fn default() -> Self {
        Self::new(EMA_PERIOD)
    }
}

impl Strategy for EmaTrend {
    fn name(&self) -> &'static str {
        "EmaTrend"
    }

    /// One full seed window plus at least one recursive step.
    fn min_samples(&self) -> usize {
        self.period + 1
    }

    fn assess(&self, samples: &[PriceSample]) -> Result<Assessment> {
        let required = self.min_samples();
        if samples.len() < required {
            return Err(Error::InsufficientData {
                required,
                received: samples.len(),
            });
        }

        let closes: Vec<f64> = samples.iter().map(|s| s.close).collect();
        let Some(ema_value) = ema(&closes, self.period) else {
            return Err(Error::IndicatorUnavailable {
                indicator: format!("ema_{}", self.period),
            });
        };
        // `samples` is non-empty past the length check.
        let close = closes[closes.len() - 1];

        let signal = if close > ema_value {
            Signal::GoLong
        } else if close < ema_value {
            Signal::GoShort
        } else {
            Signal::Hold
        };

        tracing::debug!(close, ema = ema_value, ?signal, "EMA trend assessed");

        Ok(Assessment {
            signal,
            close,
            ema: ema_value,
        })
    }
}
