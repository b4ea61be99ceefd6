//! Throttled batch style detection
//!
//! Items are classified in fixed-size chunks. Requests inside a chunk run
//! concurrently, chunks run one after another with a pause in between, and
//! a failed item never stops the run.

use crate::{
    DetectionEvent, DetectionSummary, DetectorConfig, ImportError, Result, SharedSession,
};
use futures_util::future::join_all;
use pool_core::{Classifier, ClassifyRequest, DetectionResult, ViewLifecycle};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

enum Outcome {
    Detected,
    Failed,
    Dropped,
}

/// Batch detection orchestrator
pub struct BatchDetector<C: ?Sized> {
    classifier: Arc<C>,
    config: DetectorConfig,
    lifecycle: ViewLifecycle,
    progress: Option<mpsc::Sender<DetectionEvent>>,
}

impl<C: ?Sized> Clone for BatchDetector<C> {
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
            config: self.config,
            lifecycle: self.lifecycle.clone(),
            progress: self.progress.clone(),
        }
    }
}

impl<C> BatchDetector<C>
where
    C: Classifier + ?Sized,
{
    /// Create a detector bound to an always-active lifecycle.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for a zero chunk size.
    pub fn new(classifier: Arc<C>, config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            classifier,
            config,
            lifecycle: ViewLifecycle::new(),
            progress: None,
        })
    }

    /// Tie state writes to a view lifecycle
    pub fn with_lifecycle(mut self, lifecycle: ViewLifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Send a [`DetectionEvent`] per item outcome and per finished chunk
    pub fn with_progress(mut self, progress: mpsc::Sender<DetectionEvent>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Classify every listed key that has no detection yet.
    ///
    /// Never fails; per-item errors are logged and counted.
    pub async fn run(&self, session: &SharedSession, keys: &[String]) -> DetectionSummary {
        let mut summary = DetectionSummary {
            requested: keys.len(),
            ..Default::default()
        };

        if keys.is_empty() {
            return summary;
        }

        let chunks: Vec<&[String]> = keys.chunks(self.config.chunk_size).collect();
        let total = chunks.len();

        info!(
            items = keys.len(),
            chunks = total,
            chunk_size = self.config.chunk_size,
            "Starting batch style detection"
        );

        for (index, chunk) in chunks.into_iter().enumerate() {
            if !self.lifecycle.is_active() {
                info!(chunk = index + 1, "View closed, stopping batch detection");
                break;
            }

            let work = self.pending_in_chunk(session, chunk, &mut summary).await;
            if work.is_empty() {
                debug!(chunk = index + 1, "Chunk already detected");
                continue;
            }

            let outcomes = join_all(
                work.iter()
                    .map(|(key, request)| self.detect_item(session, key, request)),
            )
            .await;

            for outcome in outcomes {
                match outcome {
                    Outcome::Detected => summary.detected += 1,
                    Outcome::Failed => summary.failed += 1,
                    Outcome::Dropped => summary.dropped += 1,
                }
            }
            summary.chunks += 1;

            self.emit(DetectionEvent::ChunkDone {
                chunk: index + 1,
                total,
            })
            .await;

            if !self.lifecycle.is_active() {
                info!(chunk = index + 1, "View closed, stopping batch detection");
                break;
            }

            if index + 1 < total {
                tokio::time::sleep(self.config.chunk_delay).await;
            }
        }

        info!(
            detected = summary.detected,
            failed = summary.failed,
            skipped = summary.skipped,
            "Batch style detection finished"
        );
        summary
    }

    /// Classify every undetected item currently in the session
    pub async fn run_pending(&self, session: &SharedSession) -> DetectionSummary {
        let keys = session.read().await.undetected_keys();
        self.run(session, &keys).await
    }

    /// Items of a chunk that still need a request, checked when the chunk starts
    async fn pending_in_chunk(
        &self,
        session: &SharedSession,
        chunk: &[String],
        summary: &mut DetectionSummary,
    ) -> Vec<(String, ClassifyRequest)> {
        let session = session.read().await;
        let mut work = Vec::with_capacity(chunk.len());

        for key in chunk {
            match session.get(key) {
                Some(item) if !session.has_detection(key) => {
                    work.push((key.clone(), item.classify_request()));
                }
                _ => summary.skipped += 1,
            }
        }
        work
    }

    async fn detect_item(
        &self,
        session: &SharedSession,
        key: &str,
        request: &ClassifyRequest,
    ) -> Outcome {
        match self.classifier.classify(request).await {
            Ok(result) => {
                if !self.store(session, key, &result).await {
                    return Outcome::Dropped;
                }
                self.emit(DetectionEvent::Detected {
                    key: key.to_string(),
                    result,
                })
                .await;
                Outcome::Detected
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Style detection failed");
                self.emit(DetectionEvent::Failed {
                    key: key.to_string(),
                    error: e.to_string(),
                })
                .await;
                Outcome::Failed
            }
        }
    }

    /// Write a result unless the view has gone away
    async fn store(&self, session: &SharedSession, key: &str, result: &DetectionResult) -> bool {
        if !self.lifecycle.is_active() {
            debug!(key = %key, "View closed, dropping detection result");
            return false;
        }

        session.write().await.apply_detection(key, result.clone());
        debug!(
            key = %key,
            style = %result.style,
            label = %result.label,
            confidence = result.confidence,
            "Style detected"
        );
        true
    }

    /// Re-detect a single item through the per-file endpoint.
    ///
    /// Unlike [`BatchDetector::run`] the error reaches the caller.
    ///
    /// # Errors
    /// Returns `UnknownKey` if the key is not in the session, `ViewClosed`
    /// if the lifecycle ended before the result was stored, or the
    /// classifier's error.
    pub async fn detect_one(&self, session: &SharedSession, key: &str) -> Result<DetectionResult> {
        if session.read().await.get(key).is_none() {
            return Err(ImportError::UnknownKey(key.to_string()));
        }

        let result = self.classifier.classify_file(key).await?;
        if !self.store(session, key, &result).await {
            return Err(ImportError::ViewClosed(key.to_string()));
        }
        info!(key = %key, label = %result.label, "Single item detected");
        Ok(result)
    }

    async fn emit(&self, event: DetectionEvent) {
        if let Some(tx) = &self.progress {
            let _ = tx.send(event).await;
        }
    }
}

impl<C> BatchDetector<C>
where
    C: Classifier + ?Sized + 'static,
{
    /// Fire-and-forget form of [`BatchDetector::run`]
    pub fn spawn(&self, session: SharedSession, keys: Vec<String>) -> JoinHandle<DetectionSummary> {
        let detector = self.clone();
        tokio::spawn(async move { detector.run(&session, &keys).await })
    }
}
