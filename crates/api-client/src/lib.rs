// In crates/api-client/src/lib.rs

use async_trait::async_trait;
use core_types::PriceSample;

pub mod error;
pub mod market_data;
pub mod types;
pub mod webhook;

// Re-export public types
pub use error::{Error, Result};
pub use market_data::parse_aggregates;
pub use types::*;

/// A source of recent price bars for a single instrument.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// The name of the provider (e.g., "PolygonAggregates").
    fn name(&self) -> &'static str;

    /// Fetches up to `count` of the newest bars for `ticker`, ordered oldest first.
    async fn recent_samples(&self, ticker: &str, count: usize) -> Result<Vec<PriceSample>>;
}

/// Longest downstream body kept in errors and logs.
pub(crate) const MAX_BODY_CHARS: usize = 512;

pub(crate) fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_BODY_CHARS) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}
