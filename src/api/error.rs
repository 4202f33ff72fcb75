//! Error types for backend requests.

use thiserror::Error;

/// Errors that can occur while talking to the dashboard backend.
///
/// The dashboard collapses every variant into a single "request failed"
/// outcome per operation; the variants exist for logging.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, reset, etc.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request exceeded the configured timeout
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Backend answered with a non-success status
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// Body could not be read or did not match the expected shape
    #[error("invalid response: {0}")]
    ParseError(String),

    /// HTTP client could not be constructed
    #[error("client configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    /// Classify a reqwest error.
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_seconds: Option<u64>) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(timeout_seconds.unwrap_or_default())
        } else if e.is_decode() {
            ApiError::ParseError(e.to_string())
        } else {
            ApiError::ConnectionFailed(e.to_string())
        }
    }
}
