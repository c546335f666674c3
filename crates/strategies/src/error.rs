// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("not enough price samples: need at least {required}, got {received}")]
    InsufficientData { required: usize, received: usize },

    #[error("indicator '{indicator}' produced no value (non-finite input)")]
    IndicatorUnavailable { indicator: String },
}

pub type Result<T> = std::result::Result<T, Error>;
