// In crates/api-client/src/types.rs

use core_types::{Action, TradingInstruction};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Client for the market-data provider's aggregate-bars endpoint.
#[derive(Clone)]
pub struct MarketDataClient {
    /// The persistent HTTP client.
    pub http_client: Client,
    pub api_key: String,
    /// The base URL for the REST API.
    pub base_url: String,
    pub multiplier: u32,
    /// Bar unit, e.g. "minute" or "hour".
    pub timespan: String,
    pub lookback_minutes: u32,
    pub timeout: Duration,
}

impl fmt::Debug for MarketDataClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketDataClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("multiplier", &self.multiplier)
            .field("timespan", &self.timespan)
            .field("lookback_minutes", &self.lookback_minutes)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Client for the downstream order-execution webhook.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    pub http_client: Client,
    pub url: String,
    pub timeout: Duration,
}

/// The aggregate-bars response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatesResponse {
    /// "OK", "DELAYED", "ERROR", "NOT_AUTHORIZED", ...
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<RawAggregate>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One bar as the provider sends it.
#[derive(Debug, Deserialize, Clone)]
pub struct RawAggregate {
    /// Bar start, epoch milliseconds.
    #[serde(rename = "t")]
    pub timestamp: i64,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v", default)]
    pub volume: f64,
}

/// The JSON body posted to the order-execution webhook.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct OrderPayload {
    pub ticker: String,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl From<&TradingInstruction> for OrderPayload {
    fn from(instruction: &TradingInstruction) -> Self {
        Self {
            ticker: instruction.ticker.clone(),
            action: instruction.action,
            quantity: instruction.quantity,
            price: instruction.price,
        }
    }
}

/// What the webhook answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

impl WebhookResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
