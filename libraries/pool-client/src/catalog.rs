//! Catalog operations: import commit and the listener track list.

use crate::error::{ClientError, Result};
use crate::response;
use crate::types::{ImportRequest, ImportResponse, TrackPage};
use pool_core::{ImportFile, ImportOutcome};
use reqwest::Client;
use tracing::{debug, info};

/// Catalog client.
pub struct CatalogClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: Option<&'a str>,
}

impl<'a> CatalogClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Commit files as tracks.
    ///
    /// A `success: false` body is returned as `Rejected` with the server message.
    pub async fn import_files(
        &self,
        files: &[ImportFile],
        ai_confidence_threshold: f32,
    ) -> Result<ImportOutcome> {
        let url = format!("{}/api/storage/import", self.base_url);
        debug!(url = %url, files = files.len(), "Committing import");

        let builder = self.http.post(&url).json(&ImportRequest {
            files,
            ai_confidence_threshold,
        });
        let response =
            response::send(response::authorize(builder, self.access_token)).await?;
        let body: ImportResponse = response::json(response, "import").await?;

        if body.success {
            info!(files = files.len(), message = %body.message, "Import committed");
            Ok(ImportOutcome {
                success: true,
                message: body.message,
            })
        } else {
            Err(ClientError::Rejected(body.message))
        }
    }

    /// Fetch one page of the track list.
    ///
    /// # Arguments
    /// * `page` - 1-based page number as the API expects it
    /// * `limit` - Page size
    pub async fn list_tracks(&self, page: usize, limit: usize) -> Result<TrackPage> {
        let url = format!("{}/api/tracks", self.base_url);
        debug!(url = %url, page, limit, "Fetching tracks");

        let builder = self
            .http
            .get(&url)
            .query(&[("page", page), ("limit", limit)]);
        let response =
            response::send(response::authorize(builder, self.access_token)).await?;
        let page: TrackPage = response::json(response, "track list").await?;

        debug!(tracks = page.tracks.len(), total = page.total, "Fetched tracks");
        Ok(page)
    }
}
