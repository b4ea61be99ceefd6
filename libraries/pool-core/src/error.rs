/// Core error types for Soundpool
use thiserror::Error;

/// Result type alias using `PoolError`
pub type Result<T> = std::result::Result<T, PoolError>;

/// Core error type for Soundpool
#[derive(Error, Debug)]
pub enum PoolError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Duplicate storage key within one listing session
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Classification failed for a single item
    #[error("Classification failed: {0}")]
    Classification(String),

    /// Response did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Remote service rejected the request
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl PoolError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a classification error
    pub fn classification(msg: impl Into<String>) -> Self {
        Self::Classification(msg.into())
    }

    /// Create a malformed response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}
