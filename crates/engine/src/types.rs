// In crates/engine/src/types.rs

use app_config::Settings;
use core_types::TradingInstruction;
use execution::DispatchReceipt;
use strategies::Assessment;

/// The slice of `Settings` the alert handler needs.
#[derive(Debug, Clone)]
pub struct HandlerSettings {
    /// Ticker orders are placed on.
    pub trading_ticker: String,
    /// Ticker whose bars feed the strategy.
    pub market_data_ticker: String,
    /// How many recent bars to request.
    pub sample_count: usize,
    /// Contracts per entry; zero omits the quantity.
    pub default_quantity: u32,
}

impl HandlerSettings {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            trading_ticker: settings.execution.ticker.clone(),
            market_data_ticker: settings.market_data.ticker.clone(),
            sample_count: settings.market_data.bars,
            default_quantity: settings.execution.default_quantity,
        }
    }

    pub(crate) fn entry_quantity(&self) -> Option<u32> {
        (self.default_quantity > 0).then_some(self.default_quantity)
    }
}

/// What became of one alert.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// An instruction was delivered downstream.
    Dispatched {
        instruction: TradingInstruction,
        receipt: DispatchReceipt,
        /// Present for entries, absent for exits.
        assessment: Option<Assessment>,
    },
    /// The close sat exactly on the EMA; nothing was sent.
    Held { assessment: Assessment },
    /// The alert matched no known phrase.
    Ignored,
}

impl Outcome {
    /// Short event name used in acknowledgments.
    pub fn event(&self) -> &'static str {
        match self {
            Outcome::Dispatched { instruction, .. } => instruction.action.as_str(),
            Outcome::Held { .. } => "hold",
            Outcome::Ignored => "ignored",
        }
    }
}
