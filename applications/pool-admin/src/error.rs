/// Admin CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdminError>;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid arguments: {0}")]
    Arguments(String),

    #[error("Import error: {0}")]
    Import(#[from] pool_importer::ImportError),
}
