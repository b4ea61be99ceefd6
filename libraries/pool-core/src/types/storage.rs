/// Storage listing domain types
use crate::types::{ClassifyRequest, DetectionResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One file as returned by the object-store listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageFile {
    /// Object key, unique within a listing (e.g. `"2024-03/Artist - Song.mp3"`)
    pub key: String,

    /// Public URL of the object
    pub url: String,

    /// Size in bytes
    pub size: u64,

    /// Last-modified timestamp reported by the store
    pub last_modified: DateTime<Utc>,

    /// File name without folder prefix
    pub filename: String,

    /// Name fields parsed server-side, when the listing provides them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_name: Option<ParsedName>,

    /// Prefilled import draft, when the listing provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_data: Option<ImportDraft>,
}

/// Best-effort name fields extracted from a filename
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedName {
    /// Artist name
    pub artist: String,

    /// Song title
    pub song_name: String,

    /// Version / mix name (e.g. "Extended Mix")
    #[serde(default)]
    pub version: Option<String>,

    /// Style tag found in the filename
    #[serde(default)]
    pub style: Option<String>,
}

/// Editable import draft for one file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDraft {
    pub song_name: String,
    pub artist: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub release_date: Option<DateTime<Utc>>,
    /// Pool / label override typed into the draft
    #[serde(default)]
    pub pool: Option<String>,
}

impl ImportDraft {
    /// Build a draft from parsed name fields and the file URL
    pub fn from_parsed(parsed: &ParsedName, url: &str) -> Self {
        Self {
            song_name: parsed.song_name.clone(),
            artist: parsed.artist.clone(),
            style: parsed.style.clone(),
            version: parsed.version.clone(),
            image_url: None,
            preview_url: Some(url.to_string()),
            download_url: Some(url.to_string()),
            release_date: None,
            pool: None,
        }
    }
}

/// A storage file parsed into a candidate track awaiting import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportableItem {
    /// Listing entry this item was built from
    pub file: StorageFile,

    /// Parsed name fields
    pub parsed: ParsedName,

    /// Mutable import draft
    pub draft: ImportDraft,

    /// AI detection result, once available
    pub detection: Option<DetectionResult>,

    /// Label chosen by hand; wins over any detection
    pub manual_label: Option<String>,
}

impl ImportableItem {
    /// Create an item from a listing entry and its parsed name.
    ///
    /// A draft supplied by the listing is kept; otherwise one is built from
    /// the parsed fields.
    pub fn new(file: StorageFile, parsed: ParsedName) -> Self {
        let draft = file
            .import_data
            .clone()
            .unwrap_or_else(|| ImportDraft::from_parsed(&parsed, &file.url));

        Self {
            file,
            parsed,
            draft,
            detection: None,
            manual_label: None,
        }
    }

    /// Storage key
    pub fn key(&self) -> &str {
        &self.file.key
    }

    /// File name
    pub fn filename(&self) -> &str {
        &self.file.filename
    }

    /// Folder part of the key (empty for top-level objects)
    pub fn folder(&self) -> &str {
        self.file
            .key
            .rsplit_once('/')
            .map(|(folder, _)| folder)
            .unwrap_or("")
    }

    /// Request body for the batch classification endpoint
    pub fn classify_request(&self) -> ClassifyRequest {
        ClassifyRequest {
            artist: self.parsed.artist.clone(),
            song_name: self.parsed.song_name.clone(),
            version: self.parsed.version.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn file(key: &str) -> StorageFile {
        StorageFile {
            key: key.to_string(),
            url: format!("https://cdn.example.com/{}", key),
            size: 1024,
            last_modified: Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap(),
            filename: key.rsplit('/').next().unwrap().to_string(),
            parsed_name: None,
            import_data: None,
        }
    }

    #[test]
    fn test_folder_of_nested_key() {
        let parsed = ParsedName::default();
        let item = ImportableItem::new(file("house/2024/a.mp3"), parsed);
        assert_eq!(item.folder(), "house/2024");
    }

    #[test]
    fn test_folder_of_top_level_key() {
        let item = ImportableItem::new(file("a.mp3"), ParsedName::default());
        assert_eq!(item.folder(), "");
    }

    #[test]
    fn test_draft_built_from_parsed_name() {
        let parsed = ParsedName {
            artist: "Artist".into(),
            song_name: "Song".into(),
            version: Some("Extended Mix".into()),
            style: None,
        };
        let item = ImportableItem::new(file("a.mp3"), parsed);

        assert_eq!(item.draft.artist, "Artist");
        assert_eq!(item.draft.version.as_deref(), Some("Extended Mix"));
        assert_eq!(
            item.draft.download_url.as_deref(),
            Some("https://cdn.example.com/a.mp3")
        );
    }

    #[test]
    fn test_listing_draft_is_kept() {
        let mut f = file("a.mp3");
        f.import_data = Some(ImportDraft {
            song_name: "From Server".into(),
            ..Default::default()
        });
        let item = ImportableItem::new(f, ParsedName::default());
        assert_eq!(item.draft.song_name, "From Server");
    }

    #[test]
    fn test_listing_entry_deserializes_camel_case() {
        let json = serde_json::json!({
            "key": "pool/Artist - Song.mp3",
            "url": "https://cdn.example.com/pool/Artist - Song.mp3",
            "size": 8_000_000,
            "lastModified": "2024-03-10T12:00:00Z",
            "filename": "Artist - Song.mp3",
            "parsedName": { "artist": "Artist", "songName": "Song" }
        });

        let f: StorageFile = serde_json::from_value(json).unwrap();
        assert_eq!(f.size, 8_000_000);
        let parsed = f.parsed_name.unwrap();
        assert_eq!(parsed.song_name, "Song");
        assert!(parsed.version.is_none());
        assert!(f.import_data.is_none());
    }
}
