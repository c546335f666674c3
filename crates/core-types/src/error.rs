// In crates/core-types/src/error.rs

use thiserror::Error;

/// Errors raised while turning an inbound webhook body into an alert message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("alert payload has no message field (expected one of: {expected})")]
    MissingMessage { expected: String },

    #[error("alert field '{field}' is not a string")]
    InvalidField { field: String },

    #[error("unsupported alert payload: {0}")]
    UnsupportedPayload(String),
}

pub type Result<T> = std::result::Result<T, Error>;
