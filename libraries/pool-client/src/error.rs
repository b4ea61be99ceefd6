//! Error types for the Soundpool API client.

use pool_core::PoolError;
use thiserror::Error;

/// Errors that can occur when talking to the Soundpool APIs.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Server answered 2xx but reported `success: false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Authentication required but no token available or token refused
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid base URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Request did not complete within its timeout
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Rate limited by server
    #[error("Rate limited, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<ClientError> for PoolError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::ParseError(msg) => PoolError::MalformedResponse(msg),
            ClientError::Rejected(msg) => PoolError::Rejected(msg),
            ClientError::Request(_)
            | ClientError::ServerUnreachable(_)
            | ClientError::Timeout(_) => PoolError::Network(err.to_string()),
            other => PoolError::Other(other.to_string()),
        }
    }
}
