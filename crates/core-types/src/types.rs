// In crates/core-types/src/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single OHLCV bar for the tracked instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Bar start time in epoch milliseconds.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// The directive sent to the order-execution webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
    /// Flatten any open position.
    Exit,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "buy",
            Action::Sell => "sell",
            Action::Exit => "exit",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The output of a strategy assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    GoLong,
    GoShort,
    /// No directional edge; nothing is dispatched.
    Hold,
}

impl Signal {
    /// The entry action for this signal, if any.
    pub fn action(&self) -> Option<Action> {
        match self {
            Signal::GoLong => Some(Action::Buy),
            Signal::GoShort => Some(Action::Sell),
            Signal::Hold => None,
        }
    }
}

/// A fire-and-forget instruction for the configured trading ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingInstruction {
    pub ticker: String,
    pub action: Action,
    /// Contracts to trade. `None` lets the receiver apply its own sizing.
    pub quantity: Option<u32>,
    /// The price quoted by the alert, forwarded as metadata.
    pub price: Option<f64>,
}

impl TradingInstruction {
    pub fn new(ticker: impl Into<String>, action: Action) -> Self {
        Self {
            ticker: ticker.into(),
            action,
            quantity: None,
            price: None,
        }
    }

    pub fn with_quantity(mut self, quantity: Option<u32>) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_price(mut self, price: Option<f64>) -> Self {
        self.price = price;
        self
    }
}
