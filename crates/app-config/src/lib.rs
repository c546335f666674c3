// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, ExecutionSettings, MarketDataSettings, ServerSettings, Settings};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from an optional `config/base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `config/production.toml`).
/// 3. Merges settings from environment variables (e.g., `APP_EXECUTION__WEBHOOK_URL=...`).
/// 4. Honors the platform-provided `PORT` variable for the listen port.
///
/// Missing required settings are an error here, before the server starts.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let config = Config::builder()
        .add_source(File::with_name("config/base").required(false))
        .add_source(File::with_name(&format!("config/{}", environment)).required(false))
        .add_source(env_source())
        .set_override_option("server.port", std::env::var("PORT").ok())?
        .build()?;

    build_settings(config)
}

/// Deserializes and validates an assembled configuration.
pub fn build_settings(config: Config) -> Result<Settings> {
    let settings: Settings = config.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}

/// `APP_` prefix, `__` between section and key: `APP_MARKET_DATA__API_KEY`.
fn env_source() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
