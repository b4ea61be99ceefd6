//! Import commit
//!
//! Sends the resolved payload to the catalog. Items leave the session only
//! after the catalog accepts them; a failed commit changes nothing.

use crate::{ImportConfig, ImportError, ImportReport, Result, SharedSession};
use pool_core::Catalog;
use std::sync::Arc;
use tracing::{info, warn};

/// Commits session items to the track catalog
pub struct Importer<C: ?Sized> {
    catalog: Arc<C>,
    config: ImportConfig,
}

impl<C> Importer<C>
where
    C: Catalog + ?Sized,
{
    /// # Errors
    /// Returns `InvalidConfig` when the config does not validate.
    pub fn new(catalog: Arc<C>, config: ImportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import every selected item still in the session
    ///
    /// # Errors
    /// See [`Importer::commit`].
    pub async fn commit_selected(&self, session: &SharedSession) -> Result<ImportReport> {
        let keys = session.read().await.selected_keys();
        self.commit(session, &keys).await
    }

    /// Import the given keys.
    ///
    /// # Errors
    /// Returns `NothingSelected` when none of the keys are in the session,
    /// or the catalog's error. The session is untouched on error.
    pub async fn commit(&self, session: &SharedSession, keys: &[String]) -> Result<ImportReport> {
        let payload = session.read().await.import_payload(keys);
        if payload.is_empty() {
            return Err(ImportError::NothingSelected("import"));
        }

        let outcome = match self
            .catalog
            .import_files(&payload, self.config.ai_confidence_threshold)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(files = payload.len(), error = %e, "Import commit failed");
                return Err(e.into());
            }
        };

        let committed: Vec<String> = payload.into_iter().map(|file| file.key).collect();
        let imported = session.write().await.remove(&committed);

        info!(imported, message = %outcome.message, "Import committed");
        Ok(ImportReport {
            imported,
            message: outcome.message,
        })
    }
}
