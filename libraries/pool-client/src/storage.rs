//! Object-store listing and deletion.

use crate::error::{ClientError, Result};
use crate::response;
use crate::types::{DeleteFilesRequest, DeleteFilesResponse, ListFilesResponse};
use reqwest::Client;
use tracing::debug;

/// Storage client for the admin API.
pub struct StorageClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: Option<&'a str>,
}

impl<'a> StorageClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// List files that have not been imported yet.
    ///
    /// # Arguments
    /// * `prefix` - Restrict the listing to one folder (None for everything)
    pub async fn list_importable(&self, prefix: Option<&str>) -> Result<ListFilesResponse> {
        let url = format!("{}/api/storage/import", self.base_url);
        debug!(url = %url, prefix = ?prefix, "Listing importable files");

        let mut request = self.http.get(&url);
        if let Some(prefix) = prefix {
            request = request.query(&[("prefix", prefix)]);
        }

        let response =
            response::send(response::authorize(request, self.access_token)).await?;
        let listing: ListFilesResponse = response::json(response, "listing").await?;

        if !listing.success {
            return Err(ClientError::Rejected(
                listing
                    .error
                    .unwrap_or_else(|| "listing failed".to_string()),
            ));
        }

        debug!(
            files = listing.files.len(),
            importable = listing.importable_count,
            "Fetched importable files"
        );

        Ok(listing)
    }

    /// Delete stored files by key.
    pub async fn delete_files(&self, keys: &[String]) -> Result<DeleteFilesResponse> {
        let url = format!("{}/api/storage/delete", self.base_url);
        debug!(url = %url, count = keys.len(), "Deleting files");

        let request = self.http.post(&url).json(&DeleteFilesRequest { keys });
        let response =
            response::send(response::authorize(request, self.access_token)).await?;
        let result: DeleteFilesResponse = response::json(response, "delete").await?;

        if result.success {
            debug!(deleted = result.deleted, "Files deleted");
            Ok(result)
        } else {
            Err(ClientError::Rejected(result.message))
        }
    }
}
