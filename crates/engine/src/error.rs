// In crates/engine/src/error.rs

use thiserror::Error;

/// Everything that can stop an alert from producing its instruction.
#[derive(Error, Debug)]
pub enum Error {
    #[error("market data fetch failed: {0}")]
    MarketData(#[source] api_client::Error),

    #[error("insufficient market data: need at least {required} samples, got {received}")]
    InsufficientData { required: usize, received: usize },

    #[error("strategy assessment failed: {0}")]
    Strategy(#[from] strategies::Error),

    #[error("dispatch failed, instruction may not have been delivered: {0}")]
    Dispatch(#[from] execution::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
