/// Persisted track as listed to subscribers
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A track already imported into the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Catalog identifier
    pub id: i64,

    /// Song title
    pub song_name: String,

    /// Artist name
    pub artist: String,

    /// Musical style
    #[serde(default)]
    pub style: Option<String>,

    /// Version / mix name
    #[serde(default)]
    pub version: Option<String>,

    /// Pool / label
    #[serde(default)]
    pub pool: Option<String>,

    /// Cover image URL
    #[serde(default)]
    pub image_url: Option<String>,

    /// Download URL
    #[serde(default)]
    pub download_url: Option<String>,

    /// Release date, used for day grouping when present
    #[serde(default)]
    pub release_date: Option<DateTime<Utc>>,

    /// When the track was added to the catalog
    pub created_at: DateTime<Utc>,
}
