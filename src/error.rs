//! Error types for the caching client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Client Error Enum ==
/// Unified error type for route construction and request dispatch.
///
/// Every failure aborts the current request; none are retried and none
/// leave a partially written cache entry behind.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Malformed route (unsupported verb or both body shapes supplied)
    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    /// Method reached dispatch without a handler
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Upstream answered outside the 2xx range
    #[error("Upstream returned HTTP {status_code} for {endpoint}")]
    UpstreamHttp { status_code: u16, endpoint: String },

    /// Response body was not valid JSON
    #[error("Failed to parse response: {0}")]
    ResponseParse(String),

    /// Call exceeded the configured timeout
    #[error("Request to {endpoint} timed out after {timeout_secs}s")]
    RequestTimeout { endpoint: String, timeout_secs: u64 },

    /// Connection or IO failure below the HTTP layer
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ClientError::Config(err.to_string())
        } else if err.is_decode() {
            ClientError::ResponseParse(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::ResponseParse(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the client.
pub type Result<T> = std::result::Result<T, ClientError>;
