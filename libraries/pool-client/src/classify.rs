//! AI style/label classification requests.

use crate::error::{ClientError, Result};
use crate::response;
use crate::types::{ClassifyResponse, FileDetectionRequest, FileDetectionResponse};
use pool_core::{ClassifyRequest, DetectionResult};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Classification client.
pub struct ClassifyClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    classifier_url: &'a str,
    access_token: Option<&'a str>,
    probe_timeout: Duration,
}

impl<'a> ClassifyClient<'a> {
    pub(crate) fn new(
        http: &'a Client,
        base_url: &'a str,
        classifier_url: &'a str,
        access_token: Option<&'a str>,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            http,
            base_url,
            classifier_url,
            access_token,
            probe_timeout,
        }
    }

    /// Classify one item from its parsed name.
    pub async fn classify(&self, request: &ClassifyRequest) -> Result<DetectionResult> {
        let url = format!("{}/api/ai/detect-style", self.classifier_url);
        debug!(
            url = %url,
            artist = %request.artist,
            song = %request.song_name,
            "Classifying track"
        );

        let builder = self.http.post(&url).json(request);
        let response =
            response::send(response::authorize(builder, self.access_token)).await?;
        let body: ClassifyResponse = response::json(response, "classification").await?;

        DetectionResult::from(body)
            .validate()
            .map_err(|e| ClientError::ParseError(e.to_string()))
    }

    /// Classify one stored file by key.
    ///
    /// Uses the short probe timeout so an unreachable service fails fast.
    pub async fn classify_file(&self, file_key: &str) -> Result<DetectionResult> {
        let url = format!("{}/api/storage/detect-style", self.base_url);
        debug!(url = %url, file_key = %file_key, "Detecting style for stored file");

        let builder = self
            .http
            .post(&url)
            .timeout(self.probe_timeout)
            .json(&FileDetectionRequest { file_key });

        let response = response::send(response::authorize(builder, self.access_token))
            .await
            .map_err(|e| match e {
                ClientError::Request(ref inner) if inner.is_timeout() => {
                    ClientError::Timeout(self.probe_timeout)
                }
                other => other,
            })?;
        let body: FileDetectionResponse = response::json(response, "detection").await?;

        match (body.success, body.detection) {
            (true, Some(detection)) => detection
                .validate()
                .map_err(|e| ClientError::ParseError(e.to_string())),
            (true, None) => Err(ClientError::ParseError(
                "detection missing from successful response".to_string(),
            )),
            (false, _) => Err(ClientError::Rejected(
                body.error.unwrap_or_else(|| "detection failed".to_string()),
            )),
        }
    }
}
