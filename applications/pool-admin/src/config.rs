/// Admin CLI configuration
use crate::error::{AdminError, Result};
use pool_client::ClientConfig;
use pool_core::TimeZoneConfig;
use pool_importer::{DetectorConfig, ImportConfig};
use pool_view::PageMode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "pool.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_detection")]
    pub detection: DetectionSettings,

    #[serde(default = "default_view")]
    pub view: ViewSettings,

    #[serde(default = "default_import")]
    pub import: ImportSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Classification service; defaults to `base_url`
    #[serde(default)]
    pub classifier_url: Option<String>,

    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DetectionSettings {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewSettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default)]
    pub mode: PageMode,

    /// Offset from UTC used for day grouping
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    #[serde(default = "default_settle_window_ms")]
    pub settle_window_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportSettings {
    #[serde(default = "default_ai_confidence_threshold")]
    pub ai_confidence_threshold: f32,

    #[serde(default = "default_label")]
    pub default_label: String,
}

impl AdminConfig {
    /// Load configuration from file and environment.
    ///
    /// Reads `path` (or `pool.toml` if present), then `POOL_` variables
    /// such as `POOL_API__BASE_URL`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`AdminConfig::load`] with an explicit environment map instead
    /// of the process environment.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(AdminError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (POOL_SECTION__KEY)
        settings = settings.add_source(
            config::Environment::with_prefix("POOL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = settings
            .build()
            .map_err(|e| AdminError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AdminError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AdminError::Config(
                "API base URL is required (set POOL_API__BASE_URL)".to_string(),
            ));
        }

        if self.detection.chunk_size == 0 {
            return Err(AdminError::Config(
                "detection.chunk_size must be at least 1".to_string(),
            ));
        }

        if self.view.page_size == 0 {
            return Err(AdminError::Config(
                "view.page_size must be at least 1".to_string(),
            ));
        }

        self.time_zone()?;
        self.import_config().validate()?;

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut client = ClientConfig::new(self.api.base_url.clone());
        client.classifier_url = self.api.classifier_url.clone();
        client.access_token = self.api.access_token.clone();
        client.request_timeout = Duration::from_secs(self.api.request_timeout_secs);
        client.probe_timeout = Duration::from_secs(self.api.probe_timeout_secs);
        client
    }

    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            chunk_size: self.detection.chunk_size,
            chunk_delay: Duration::from_millis(self.detection.chunk_delay_ms),
        }
    }

    pub fn import_config(&self) -> ImportConfig {
        ImportConfig {
            ai_confidence_threshold: self.import.ai_confidence_threshold,
            default_label: self.import.default_label.clone(),
        }
    }

    pub fn time_zone(&self) -> Result<TimeZoneConfig> {
        TimeZoneConfig::from_offset_minutes(self.view.utc_offset_minutes)
            .map_err(|e| AdminError::Config(e.to_string()))
    }

    pub fn settle_window(&self) -> Duration {
        Duration::from_millis(self.view.settle_window_ms)
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
        classifier_url: None,
        access_token: None,
        request_timeout_secs: default_request_timeout_secs(),
        probe_timeout_secs: default_probe_timeout_secs(),
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_probe_timeout_secs() -> u64 {
    10
}

fn default_detection() -> DetectionSettings {
    DetectionSettings {
        chunk_size: default_chunk_size(),
        chunk_delay_ms: default_chunk_delay_ms(),
    }
}

fn default_chunk_size() -> usize {
    pool_importer::DEFAULT_CHUNK_SIZE
}

fn default_chunk_delay_ms() -> u64 {
    1000
}

fn default_view() -> ViewSettings {
    ViewSettings {
        page_size: default_page_size(),
        mode: PageMode::default(),
        utc_offset_minutes: default_utc_offset_minutes(),
        settle_window_ms: default_settle_window_ms(),
    }
}

fn default_page_size() -> usize {
    50
}

fn default_utc_offset_minutes() -> i32 {
    -180
}

fn default_settle_window_ms() -> u64 {
    100
}

fn default_import() -> ImportSettings {
    ImportSettings {
        ai_confidence_threshold: default_ai_confidence_threshold(),
        default_label: default_label(),
    }
}

fn default_ai_confidence_threshold() -> f32 {
    0.7
}

fn default_label() -> String {
    pool_importer::DEFAULT_LABEL.to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            detection: default_detection(),
            view: default_view(),
            import: default_import(),
        }
    }
}
