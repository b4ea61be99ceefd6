/// Import commit types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One file in an import commit, with its label already resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFile {
    pub key: String,
    pub url: String,
    pub size: u64,
    pub filename: String,
    pub song_name: String,
    pub artist: String,
    pub style: Option<String>,
    pub version: Option<String>,
    pub image_url: Option<String>,
    pub preview_url: Option<String>,
    pub download_url: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    /// Resolved pool / label
    pub pool: String,
    /// Confidence of the AI detection the label came from, if any
    pub ai_confidence: Option<f32>,
}

/// Result of an import commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub message: String,
}
