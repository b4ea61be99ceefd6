//! Soundpool API Client
//!
//! HTTP client library for the services the import pipeline depends on.
//!
//! # Features
//!
//! - **Storage**: List importable files (optionally by folder), delete files
//! - **Classification**: Batch-path and single-item AI style/label detection
//! - **Catalog**: Commit imports, page through the listener track list
//!
//! `PoolClient` also implements the `pool_core::Classifier` and
//! `pool_core::Catalog` traits, so it plugs straight into the importer.
//!
//! # Example
//!
//! ```ignore
//! use pool_client::{ClientConfig, PoolClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://admin.example.com").with_token("secret");
//!     let client = PoolClient::new(config)?;
//!
//!     let listing = client.storage().list_importable(None).await?;
//!     println!("Found {} files", listing.files.len());
//!
//!     Ok(())
//! }
//! ```

mod catalog;
mod classify;
mod client;
mod error;
mod response;
mod storage;
mod types;

pub use client::PoolClient;
pub use error::{ClientError, Result};
pub use types::{
    ClassifyResponse, ClientConfig, DeleteFilesResponse, FileDetectionResponse,
    ImportResponse, ListFilesResponse, TrackPage,
};

// Re-export sub-clients for direct use if needed
pub use catalog::CatalogClient;
pub use classify::ClassifyClient;
pub use storage::StorageClient;
