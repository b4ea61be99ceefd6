//! Types for Soundpool API requests and responses.

use pool_core::{DetectionResult, ImportFile, StorageFile, Track};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for connecting to the Soundpool APIs.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the admin API (e.g. "https://admin.example.com")
    pub url: String,
    /// Base URL of the classification service; defaults to `url`
    pub classifier_url: Option<String>,
    /// Bearer token attached to every request
    pub access_token: Option<String>,
    /// Overall timeout for ordinary requests
    pub request_timeout: Duration,
    /// Short timeout for the single-item detection path
    pub probe_timeout: Duration,
}

impl ClientConfig {
    /// Create a new config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            classifier_url: None,
            access_token: None,
            request_timeout: Duration::from_secs(30),
            probe_timeout: Duration::from_secs(10),
        }
    }

    /// Attach a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Send classification requests to a different host.
    pub fn with_classifier_url(mut self, url: impl Into<String>) -> Self {
        self.classifier_url = Some(url.into());
        self
    }
}

// =============================================================================
// Storage Types
// =============================================================================

/// Response from the importable-files listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesResponse {
    pub success: bool,
    #[serde(default)]
    pub files: Vec<StorageFile>,
    #[serde(default)]
    pub importable_count: usize,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request body for deleting stored files.
#[derive(Debug, Serialize)]
pub struct DeleteFilesRequest<'a> {
    pub keys: &'a [String],
}

/// Response from file deletion.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteFilesResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub deleted: usize,
}

// =============================================================================
// Classification Types
// =============================================================================

/// Response from the batch classification endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub style: String,
    pub label: String,
    pub confidence: f32,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

impl From<ClassifyResponse> for DetectionResult {
    fn from(resp: ClassifyResponse) -> Self {
        Self {
            style: resp.style,
            label: resp.label,
            confidence: resp.confidence,
            source: resp.platform,
            cover_image: resp.cover_image,
        }
    }
}

/// Request body for the single-item detection endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDetectionRequest<'a> {
    pub file_key: &'a str,
}

/// Response from the single-item detection endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FileDetectionResponse {
    pub success: bool,
    #[serde(default)]
    pub detection: Option<DetectionResult>,
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// Catalog Types
// =============================================================================

/// Request body for the import commit.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest<'a> {
    pub files: &'a [ImportFile],
    pub ai_confidence_threshold: f32,
}

/// Response from the import commit.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// One page of the listener-facing track list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackPage {
    pub tracks: Vec<Track>,
    pub total: usize,
}
