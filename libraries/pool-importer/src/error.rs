//! Error types for the importer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Client error: {0}")]
    Client(#[from] pool_client::ClientError),

    #[error("Pool error: {0}")]
    Pool(#[from] pool_core::PoolError),

    #[error("Unknown storage key: {0}")]
    UnknownKey(String),

    #[error("Nothing selected to {0}")]
    NothingSelected(&'static str),

    #[error("View closed before the result for {0} could be stored")]
    ViewClosed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
