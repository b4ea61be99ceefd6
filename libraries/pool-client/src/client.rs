//! Main Soundpool API client.

use crate::catalog::CatalogClient;
use crate::classify::ClassifyClient;
use crate::error::{ClientError, Result};
use crate::storage::StorageClient;
use crate::types::ClientConfig;
use async_trait::async_trait;
use pool_core::{
    Catalog, ClassifyRequest, Classifier, DetectionResult, ImportFile, ImportOutcome, PoolError,
};
use reqwest::Client;

/// Client for the Soundpool admin, storage, and classification APIs.
///
/// The client is cheap to clone; clones share the connection pool.
///
/// # Example
///
/// ```ignore
/// use pool_client::{ClientConfig, PoolClient};
///
/// let client = PoolClient::new(ClientConfig::new("https://admin.example.com"))?;
/// let listing = client.storage().list_importable(Some("2024-03")).await?;
/// println!("{} importable files", listing.importable_count);
/// ```
#[derive(Clone)]
pub struct PoolClient {
    http: Client,
    url: String,
    classifier_url: String,
    config: ClientConfig,
}

impl PoolClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let url = normalize_url(&config.url)?;
        let classifier_url = match &config.classifier_url {
            Some(classifier) => normalize_url(classifier)?,
            None => url.clone(),
        };

        let http = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.probe_timeout)
            .user_agent(format!("Soundpool-Admin/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            url,
            classifier_url,
            config,
        })
    }

    /// Normalized base URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Normalized classification service URL.
    pub fn classifier_url(&self) -> &str {
        &self.classifier_url
    }

    /// Storage listing and deletion.
    pub fn storage(&self) -> StorageClient<'_> {
        StorageClient::new(&self.http, &self.url, self.config.access_token.as_deref())
    }

    /// AI classification.
    pub fn classifier(&self) -> ClassifyClient<'_> {
        ClassifyClient::new(
            &self.http,
            &self.url,
            &self.classifier_url,
            self.config.access_token.as_deref(),
            self.config.probe_timeout,
        )
    }

    /// Import commit and track list.
    pub fn catalog(&self) -> CatalogClient<'_> {
        CatalogClient::new(&self.http, &self.url, self.config.access_token.as_deref())
    }
}

fn normalize_url(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let trimmed = raw.trim_end_matches('/');
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    url::Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
    Ok(trimmed.to_string())
}

#[async_trait]
impl Classifier for PoolClient {
    async fn classify(&self, request: &ClassifyRequest) -> pool_core::Result<DetectionResult> {
        self.classifier()
            .classify(request)
            .await
            .map_err(PoolError::from)
    }

    async fn classify_file(&self, file_key: &str) -> pool_core::Result<DetectionResult> {
        self.classifier()
            .classify_file(file_key)
            .await
            .map_err(PoolError::from)
    }
}

#[async_trait]
impl Catalog for PoolClient {
    async fn import_files(
        &self,
        files: &[ImportFile],
        ai_confidence_threshold: f32,
    ) -> pool_core::Result<ImportOutcome> {
        self.catalog()
            .import_files(files, ai_confidence_threshold)
            .await
            .map_err(PoolError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        assert!(PoolClient::new(ClientConfig::new("https://example.com")).is_ok());
        assert!(PoolClient::new(ClientConfig::new("http://localhost:3000")).is_ok());

        assert!(PoolClient::new(ClientConfig::new("")).is_err());
        assert!(PoolClient::new(ClientConfig::new("not-a-url")).is_err());
        assert!(PoolClient::new(ClientConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client = PoolClient::new(ClientConfig::new("https://example.com//")).unwrap();
        assert_eq!(client.url(), "https://example.com");
        assert_eq!(client.classifier_url(), "https://example.com");
    }

    #[test]
    fn test_separate_classifier_url() {
        let config = ClientConfig::new("https://example.com")
            .with_classifier_url("https://ai.example.com/");
        let client = PoolClient::new(config).unwrap();
        assert_eq!(client.classifier_url(), "https://ai.example.com");
    }
}
