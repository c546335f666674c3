// In crates/core-types/src/lib.rs

pub mod alert;
pub mod error;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use alert::{Alert, AlertDetails, AlertKind, AlertPayload};
pub use error::{Error, Result};
pub use types::{Action, PriceSample, Signal, TradingInstruction};
