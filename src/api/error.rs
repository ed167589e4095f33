//! Transport error types for the users API

use thiserror::Error;

/// Failures talking to the users endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Request never produced a response (DNS, connect, TLS, ...)
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-2xx status
    #[error("server returned HTTP {status}")]
    Status { status: u16, body: String },

    /// 2xx response whose body is not JSON
    #[error("invalid response body: {0}")]
    Decode(String),

    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else if err.is_builder() {
            TransportError::Client(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}
