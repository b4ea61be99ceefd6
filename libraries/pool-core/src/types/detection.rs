/// AI detection domain types
use crate::error::{PoolError, Result};
use serde::{Deserialize, Serialize};

/// Request body for the batch classification endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    pub artist: String,
    pub song_name: String,
    pub version: Option<String>,
}

/// AI-derived classification of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Detected musical style
    pub style: String,

    /// Detected label / pool
    pub label: String,

    /// Confidence in `[0.0, 1.0]`
    pub confidence: f32,

    /// Which platform or model produced the result
    #[serde(default)]
    pub source: Option<String>,

    /// Cover image URL found during detection
    #[serde(default)]
    pub cover_image: Option<String>,
}

impl DetectionResult {
    /// Check that the result is usable.
    ///
    /// # Errors
    /// Returns `MalformedResponse` when confidence is outside `[0, 1]` or NaN.
    pub fn validate(self) -> Result<Self> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(PoolError::malformed(format!(
                "confidence {} outside [0, 1]",
                self.confidence
            )));
        }
        Ok(self)
    }

    /// Whether the confidence reaches the given threshold
    pub fn is_confident(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }
}
