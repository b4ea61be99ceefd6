//! Soundpool Core
//!
//! Platform-agnostic types, traits, and error handling shared by the
//! Soundpool import pipeline and the listener-facing track list.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `StorageFile`, `ImportableItem`, `DetectionResult`, `Track`
//! - **Core Traits**: `Classifier` (AI style/label detection), `Catalog` (import commit)
//! - **Day Bucketing**: `TimeZoneConfig` and `DayKey` for fixed-timezone calendar days
//! - **Lifecycle**: `ViewLifecycle`, the guard that silences writes after teardown
//! - **Error Handling**: Unified `PoolError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use pool_core::{DayKey, TimeZoneConfig};
//!
//! let zone = TimeZoneConfig::brasilia();
//! let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
//!
//! // 01:30 UTC is still the previous evening in Brasília
//! let late = Utc.with_ymd_and_hms(2024, 3, 10, 1, 30, 0).unwrap();
//! let key = zone.day_key(Some(late), now);
//! assert_eq!(key.to_string(), "2024-03-09");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod day;
pub mod error;
pub mod lifecycle;
pub mod traits;
pub mod types;

pub use day::{DayKey, DayRelation, Dated, TimeZoneConfig};
pub use error::{PoolError, Result};
pub use lifecycle::ViewLifecycle;
pub use traits::{Catalog, Classifier, Keyed};

pub use types::{
    // Storage listing
    ImportDraft, ImportableItem, ParsedName, StorageFile,
    // Detection
    ClassifyRequest, DetectionResult,
    // Import
    ImportFile, ImportOutcome,
    // Listener side
    Track,
};
