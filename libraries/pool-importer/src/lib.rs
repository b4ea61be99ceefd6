//! Soundpool Import Pipeline
//!
//! Turns a storage listing into importable items, classifies them with the
//! AI classifier in throttled batches, and commits the chosen items to the
//! track catalog.
//!
//! # Architecture
//!
//! - `parse`: Filename to artist/song/version/style
//! - `session`: Items, detection cache, and selection of one listing
//! - `detector`: Chunked, rate-limited batch detection
//! - `import`: Label resolution and import commit
//! - `listing`: Loading and deleting through the storage API
//!
//! # Example
//!
//! ```ignore
//! use pool_importer::{load_session, BatchDetector, DetectorConfig};
//! use std::sync::Arc;
//!
//! let session = load_session(&client, None, "Unlabeled").await?.shared();
//! let detector = BatchDetector::new(Arc::new(client.clone()), DetectorConfig::default())?;
//! let summary = detector.run_pending(&session).await;
//! println!("{} detected, {} failed", summary.detected, summary.failed);
//! ```

#![forbid(unsafe_code)]

mod error;
mod types;

pub mod detector;
pub mod import;
pub mod listing;
pub mod parse;
pub mod session;

pub use detector::BatchDetector;
pub use error::ImportError;
pub use import::Importer;
pub use listing::{delete_keys, load_session};
pub use parse::parse_filename;
pub use session::{ImportSession, ResolvedLabel, SharedSession};
pub use types::{
    DetectionEvent, DetectionSummary, DetectorConfig, ImportConfig, ImportReport,
    DEFAULT_CHUNK_DELAY, DEFAULT_CHUNK_SIZE, DEFAULT_LABEL,
};

pub type Result<T> = std::result::Result<T, ImportError>;
