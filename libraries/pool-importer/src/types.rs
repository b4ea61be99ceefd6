//! Importer configuration and reporting types

use crate::{ImportError, Result};
use pool_core::DetectionResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of classification requests in flight per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 5;

/// Default pause between chunks
pub const DEFAULT_CHUNK_DELAY: Duration = Duration::from_millis(1000);

/// Label used when neither a manual label nor a detection is available
pub const DEFAULT_LABEL: &str = "Unlabeled";

/// Batch detection tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Items classified concurrently in one chunk
    pub chunk_size: usize,

    /// Sleep between consecutive chunks
    pub chunk_delay: Duration,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_delay: DEFAULT_CHUNK_DELAY,
        }
    }
}

impl DetectorConfig {
    /// # Errors
    /// Returns `InvalidConfig` for a zero chunk size.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ImportError::InvalidConfig(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Import commit settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Minimum AI confidence the catalog accepts for an AI-sourced label
    pub ai_confidence_threshold: f32,

    /// Label used when nothing better is known
    pub default_label: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            ai_confidence_threshold: 0.7,
            default_label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl ImportConfig {
    /// # Errors
    /// Returns `InvalidConfig` when the threshold is outside `[0, 1]` or the
    /// default label is blank.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.ai_confidence_threshold) {
            return Err(ImportError::InvalidConfig(format!(
                "ai_confidence_threshold {} outside [0, 1]",
                self.ai_confidence_threshold
            )));
        }
        if self.default_label.trim().is_empty() {
            return Err(ImportError::InvalidConfig(
                "default_label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Progress notification emitted by a detection run
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionEvent {
    /// One item was classified and written
    Detected { key: String, result: DetectionResult },

    /// One item failed; it stays undetected
    Failed { key: String, error: String },

    /// A chunk finished (1-based index)
    ChunkDone { chunk: usize, total: usize },
}

/// Counters for one detection run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DetectionSummary {
    /// Keys handed to the run
    pub requested: usize,

    /// Already detected or no longer present when their chunk started
    pub skipped: usize,

    pub detected: usize,

    pub failed: usize,

    /// Chunks that actually ran
    pub chunks: usize,

    /// Results that arrived after the view closed and were dropped
    pub dropped: usize,
}

/// Result of a successful import commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Items removed from the session
    pub imported: usize,

    /// Message returned by the catalog
    pub message: String,
}
