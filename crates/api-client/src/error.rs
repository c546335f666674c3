// In crates/api-client/src/error.rs

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Request failed: {0}")]
    RequestFailed(reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("API error: status {status}, msg: {msg}")]
    ApiError { status: String, msg: String },
}

impl Error {
    /// Separates timeouts from other transport failures.
    pub(crate) fn from_request(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Error::Timeout(timeout)
        } else {
            Error::from(err)
        }
    }
}

impl From<reqwest::Error> for Error {
    /// Drops the request URL, which carries the API key or the webhook token.
    fn from(err: reqwest::Error) -> Self {
        Error::RequestFailed(err.without_url())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
