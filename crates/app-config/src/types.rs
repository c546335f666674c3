// In crates/app-config/src/types.rs

use serde::Deserialize;

use crate::{Error, Result};
use strategies::ema_trend::EMA_PERIOD;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub server: ServerSettings,
    /// Settings for the market-data provider.
    pub market_data: MarketDataSettings,
    /// Settings for the downstream order-execution webhook.
    pub execution: ExecutionSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct MarketDataSettings {
    /// The API key for the market-data provider.
    pub api_key: String,
    /// The ticker whose bars feed the EMA (e.g., a continuous futures contract).
    pub ticker: String,
    /// The REST API base URL.
    #[serde(default = "default_rest_base_url")]
    pub rest_base_url: String,
    /// Bar size multiplier, combined with `timespan` (1 x "minute" = 1m bars).
    #[serde(default = "default_multiplier")]
    pub multiplier: u32,
    #[serde(default = "default_timespan")]
    pub timespan: String,
    /// How far back the bar request reaches.
    #[serde(default = "default_lookback_minutes")]
    pub lookback_minutes: u32,
    /// How many of the newest bars are kept for the EMA.
    #[serde(default = "default_bars")]
    pub bars: usize,
    #[serde(default = "default_market_data_timeout")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ExecutionSettings {
    /// The order-execution webhook URL.
    pub webhook_url: String,
    /// The ticker orders are placed on.
    pub ticker: String,
    /// Contracts per entry order. Zero leaves sizing to the receiver.
    #[serde(default = "default_quantity")]
    pub default_quantity: u32,
    #[serde(default = "default_execution_timeout")]
    pub timeout_secs: u64,
    /// Log instructions instead of sending them.
    #[serde(default)]
    pub dry_run: bool,
}

impl Settings {
    /// Rejects settings that would deserialize but cannot work.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("market_data.api_key", &self.market_data.api_key)?;
        require_non_empty("market_data.ticker", &self.market_data.ticker)?;
        require_non_empty("execution.ticker", &self.execution.ticker)?;
        require_http_url("market_data.rest_base_url", &self.market_data.rest_base_url)?;
        require_http_url("execution.webhook_url", &self.execution.webhook_url)?;

        let min_bars = EMA_PERIOD + 1;
        if self.market_data.bars < min_bars {
            return Err(Error::InvalidSetting {
                key: "market_data.bars",
                reason: format!("must be at least {min_bars}, got {}", self.market_data.bars),
            });
        }
        if self.market_data.multiplier == 0 {
            return Err(Error::InvalidSetting {
                key: "market_data.multiplier",
                reason: "must be greater than zero".into(),
            });
        }
        if self.market_data.timeout_secs == 0 {
            return Err(Error::InvalidSetting {
                key: "market_data.timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        if self.execution.timeout_secs == 0 {
            return Err(Error::InvalidSetting {
                key: "execution.timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

fn require_non_empty(key: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidSetting {
            key,
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}

fn require_http_url(key: &'static str, value: &str) -> Result<()> {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(Error::InvalidSetting {
            key,
            reason: format!("expected an http(s) URL, got '{value}'"),
        });
    }
    Ok(())
}

/// Helper functions for serde defaults
fn default_environment() -> String { "development".into() }
fn default_log_level() -> String { "info".into() }
fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 8000 }
fn default_rest_base_url() -> String { "https://api.polygon.io".into() }
fn default_multiplier() -> u32 { 1 }
fn default_timespan() -> String { "minute".into() }
fn default_lookback_minutes() -> u32 { 240 }
fn default_bars() -> usize { 50 }
fn default_market_data_timeout() -> u64 { 10 }
fn default_quantity() -> u32 { 1 }
fn default_execution_timeout() -> u64 { 5 }
