// In crates/web-server/src/lib.rs

use app_config::ServerSettings;
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, header},
    response::Json,
    routing::{get, post},
};
use core_types::{Alert, AlertPayload};
use engine::AlertHandler;
use std::sync::Arc;
use tokio::net::TcpListener;
use types::{AckResponse, StatusResponse};

pub mod error;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
///
/// The alert handler is read-only, so requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<AlertHandler>,
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(status_handler))
        .route("/health", get(health_check_handler))
        .route("/webhook", post(webhook_handler))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(app_state)
}

/// A simple health check handler.
async fn health_check_handler() -> &'static str {
    "OK"
}

/// The handler for `GET /`. Names the relay and what it trades.
async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let settings = state.handler.settings();
    Json(StatusResponse {
        ok: true,
        message: format!(
            "Titan alert relay running (13 EMA on {}, trading {})",
            settings.market_data_ticker, settings.trading_ticker
        ),
    })
}

/// The handler for `POST /webhook`.
///
/// Accepts plain text, JSON, or form bodies, extracts the alert text, and runs
/// it through the `AlertHandler`.
async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AckResponse>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    tracing::info!(bytes = body.len(), content_type = ?content_type, "Incoming alert");

    let payload = AlertPayload::detect(content_type, &body);
    let message = payload.message()?;
    tracing::info!(%message, "Alert message extracted");

    let outcome = state.handler.handle(&Alert::new(message)).await?;
    tracing::info!(event = outcome.event(), "Alert handled");

    Ok(Json(AckResponse::from(&outcome)))
}

/// The main entry point for running the web server.
///
/// This function sets up the TCP listener and serves the application router
/// until Ctrl-C is received.
pub async fn run(settings: ServerSettings, handler: AlertHandler) -> Result<()> {
    let app_state = AppState {
        handler: Arc::new(handler),
    };
    let app = create_router(app_state);

    let address = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;
    tracing::info!("Web server listening on {}", address);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::ServerError)?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal.");
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
