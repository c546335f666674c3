// In crates/web-server/src/error.rs

use crate::types::AckResponse;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    BadRequest(#[from] core_types::Error),

    #[error("{0}")]
    Handler(#[from] engine::Error),

    #[error("Failed to bind server address: {0}")]
    ServerBindError(std::io::Error),

    #[error("Server error: {0}")]
    ServerError(std::io::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Handler(engine::Error::Strategy(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            // Upstream or downstream service failures.
            Error::Handler(_) => StatusCode::BAD_GATEWAY,
            Error::ServerBindError(_) | Error::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(%status, error = %self, "Alert not carried out.");
        (status, Json(AckResponse::error(self.to_string()))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
