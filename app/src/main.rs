// In app/src/main.rs

use anyhow::Result;
use api_client::{MarketDataClient, WebhookClient};
use app_config::Settings;
use clap::{Parser, Subcommand};
use core_types::Alert;
use engine::{AlertHandler, HandlerSettings};
use execution::Executor;
use execution::dry_run::DryRunExecutor;
use execution::webhook::WebhookExecutor;
use std::sync::Arc;
use strategies::EmaTrend;
use tracing_subscriber::prelude::*;
use web_server::types::AckResponse;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Relays charting alerts to an order-execution webhook.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serves the alert webhook.
    Run,

    /// Runs a single alert through the handler and prints the acknowledgment.
    ///
    /// Uses the configured market-data provider and executor, so set
    /// `APP_EXECUTION__DRY_RUN=true` to avoid sending a real order.
    Alert {
        /// The alert text, e.g. "MNQZ2025 Exit Signal, Price = 25787.00".
        text: String,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    // Missing required settings stop the process here.
    let settings = app_config::load_settings()?;
    init_tracing(&settings.app.log_level);

    tracing::info!(environment = %settings.app.environment, "Starting Titan alert relay");

    let handler = build_handler(&settings)?;

    match cli.command {
        Commands::Run => {
            web_server::run(settings.server.clone(), handler).await?;
        }
        Commands::Alert { text } => {
            handle_single_alert(&handler, text).await?;
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let parsed: Option<tracing::Level> = log_level.parse().ok();
    let level = parsed.unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_filter(tracing_subscriber::filter::Targets::new()
            .with_target("hyper", tracing::Level::WARN)
            .with_target("reqwest", tracing::Level::WARN)
            .with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();

    if parsed.is_none() {
        tracing::warn!(log_level, "Unrecognized app.log_level; using INFO.");
    }
}

/// Wires the market-data client, the executor and the strategy into one handler.
fn build_handler(settings: &Settings) -> Result<AlertHandler> {
    let market_data = Arc::new(MarketDataClient::new(&settings.market_data)?);

    // Conditionally instantiate the executor based on the config flag
    let executor: Arc<dyn Executor> = if settings.execution.dry_run {
        tracing::info!("Dry run enabled. Instructions will be logged, not sent.");
        Arc::new(DryRunExecutor::new())
    } else {
        tracing::warn!(ticker = %settings.execution.ticker, "LIVE DISPATCH IS ENABLED. REAL ORDERS WILL BE SENT.");
        Arc::new(WebhookExecutor::new(WebhookClient::new(&settings.execution)?))
    };

    Ok(AlertHandler::new(
        HandlerSettings::from_settings(settings),
        market_data,
        executor,
        Box::new(EmaTrend::default()),
    ))
}

// --- "Alert" Subcommand Logic ---

async fn handle_single_alert(handler: &AlertHandler, text: String) -> Result<()> {
    let outcome = handler.handle(&Alert::new(text)).await?;
    let ack = AckResponse::from(&outcome);
    println!("{}", serde_json::to_string_pretty(&ack)?);
    Ok(())
}
