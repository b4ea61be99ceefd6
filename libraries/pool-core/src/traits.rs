/// Core traits for Soundpool
use crate::error::Result;
use crate::types::{
    ClassifyRequest, DetectionResult, ImportFile, ImportOutcome, ImportableItem, Track,
};
use async_trait::async_trait;
use std::borrow::Cow;

/// AI style/label classifier
///
/// Implementers talk to the external classification service. Every call
/// classifies exactly one item; batching and throttling are the caller's job.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify one item from its parsed name (batch path).
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or a
    /// response that does not have the expected shape.
    async fn classify(&self, request: &ClassifyRequest) -> Result<DetectionResult>;

    /// Classify one stored file by its storage key (single-item path).
    ///
    /// # Errors
    /// Same conditions as [`Classifier::classify`], plus a timeout when the
    /// service does not answer within the implementation's probe window.
    async fn classify_file(&self, file_key: &str) -> Result<DetectionResult>;
}

/// Track catalog that accepts imported files
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Commit a batch of files as persisted tracks.
    ///
    /// # Errors
    /// Returns an error when the catalog rejects the batch or is unreachable.
    async fn import_files(
        &self,
        files: &[ImportFile],
        ai_confidence_threshold: f32,
    ) -> Result<ImportOutcome>;
}

/// Stable identity used by selection sets
pub trait Keyed {
    /// Key that identifies this entry within one listing
    fn selection_key(&self) -> Cow<'_, str>;
}

impl<T: Keyed + ?Sized> Keyed for &T {
    fn selection_key(&self) -> Cow<'_, str> {
        (**self).selection_key()
    }
}

impl Keyed for ImportableItem {
    fn selection_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.key())
    }
}

impl Keyed for Track {
    fn selection_key(&self) -> Cow<'_, str> {
        Cow::Owned(self.id.to_string())
    }
}
