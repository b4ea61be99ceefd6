//! In-memory import session
//!
//! Owns the importable items of one listing, the detection result cache and
//! the selection. Shared between the view and background detection through
//! [`SharedSession`].

use crate::parse::parse_filename;
use pool_core::{DetectionResult, ImportDraft, ImportFile, ImportableItem, PoolError, StorageFile};
use pool_view::Selection;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Session handle shared with background tasks
pub type SharedSession = Arc<RwLock<ImportSession>>;

/// Label picked for an import, with the confidence it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLabel {
    pub label: String,
    /// Set only when the label came from an AI detection
    pub ai_confidence: Option<f32>,
}

#[derive(Debug, Default)]
pub struct ImportSession {
    items: Vec<ImportableItem>,
    index: HashMap<String, usize>,
    detections: HashMap<String, DetectionResult>,
    selection: Selection,
    default_label: String,
}

impl ImportSession {
    pub fn new(default_label: impl Into<String>) -> Self {
        Self {
            default_label: default_label.into(),
            ..Default::default()
        }
    }

    /// Build a session from a storage listing.
    ///
    /// Name fields supplied by the listing win over the local parser.
    ///
    /// # Errors
    /// Returns `PoolError::Duplicate` if the listing repeats a key.
    pub fn from_listing(
        files: Vec<StorageFile>,
        default_label: impl Into<String>,
    ) -> Result<Self, PoolError> {
        let mut session = Self::new(default_label);
        for file in files {
            let parsed = file
                .parsed_name
                .clone()
                .unwrap_or_else(|| parse_filename(&file.filename));
            session.insert(ImportableItem::new(file, parsed))?;
        }
        debug!(items = session.len(), "Import session built");
        Ok(session)
    }

    /// Wrap into a [`SharedSession`]
    pub fn shared(self) -> SharedSession {
        Arc::new(RwLock::new(self))
    }

    /// # Errors
    /// Returns `PoolError::Duplicate` if the key is already present.
    pub fn insert(&mut self, item: ImportableItem) -> Result<(), PoolError> {
        if self.index.contains_key(item.key()) {
            return Err(PoolError::Duplicate(item.key().to_string()));
        }
        self.index.insert(item.key().to_string(), self.items.len());
        self.items.push(item);
        Ok(())
    }

    pub fn items(&self) -> &[ImportableItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keys in listing order
    pub fn keys(&self) -> Vec<String> {
        self.items.iter().map(|item| item.key().to_string()).collect()
    }

    pub fn get(&self, key: &str) -> Option<&ImportableItem> {
        self.index.get(key).map(|&i| &self.items[i])
    }

    fn get_mut(&mut self, key: &str) -> Result<&mut ImportableItem, PoolError> {
        match self.index.get(key) {
            Some(&i) => Ok(&mut self.items[i]),
            None => Err(PoolError::not_found("Import item", key)),
        }
    }

    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    /// Distinct folders, sorted
    pub fn folders(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.folder().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    // ------------------------------------------------------------------
    // Detection
    // ------------------------------------------------------------------

    /// Whether the key already has a detection in the cache or on its item
    pub fn has_detection(&self, key: &str) -> bool {
        self.detections.contains_key(key)
            || self.get(key).is_some_and(|item| item.detection.is_some())
    }

    /// Cached detection for a key
    pub fn cached_detection(&self, key: &str) -> Option<&DetectionResult> {
        self.detections.get(key)
    }

    /// Record a detection in the cache and on the item.
    ///
    /// Returns false when the item is no longer in the session; the cache
    /// entry is still written.
    pub fn apply_detection(&mut self, key: &str, result: DetectionResult) -> bool {
        let applied = match self.index.get(key) {
            Some(&i) => {
                self.items[i].detection = Some(result.clone());
                true
            }
            None => false,
        };
        self.detections.insert(key.to_string(), result);
        applied
    }

    /// Keys without any detection, in listing order
    pub fn undetected_keys(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| !self.has_detection(item.key()))
            .map(|item| item.key().to_string())
            .collect()
    }

    // ------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------

    /// Set or clear the manual label of one item.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown key.
    pub fn set_manual_label(&mut self, key: &str, label: Option<String>) -> Result<(), PoolError> {
        self.get_mut(key)?.manual_label = label;
        Ok(())
    }

    /// Edit the draft of one item in place.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown key.
    pub fn update_draft<F>(&mut self, key: &str, edit: F) -> Result<(), PoolError>
    where
        F: FnOnce(&mut ImportDraft),
    {
        edit(&mut self.get_mut(key)?.draft);
        Ok(())
    }

    /// Override the style of every listed item. Unknown keys are ignored.
    pub fn apply_bulk_style(&mut self, keys: &[String], style: &str) -> usize {
        self.bulk(keys, |item| item.draft.style = Some(style.to_string()))
    }

    /// Override the label of every listed item. Unknown keys are ignored.
    pub fn apply_bulk_label(&mut self, keys: &[String], label: &str) -> usize {
        self.bulk(keys, |item| item.manual_label = Some(label.to_string()))
    }

    fn bulk<F>(&mut self, keys: &[String], mut edit: F) -> usize
    where
        F: FnMut(&mut ImportableItem),
    {
        let mut touched = 0;
        for key in keys {
            if let Some(&i) = self.index.get(key.as_str()) {
                edit(&mut self.items[i]);
                touched += 1;
            }
        }
        touched
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// Replace the selection with every item under `folder`
    pub fn select_folder(&mut self, folder: &str) -> usize {
        let Self {
            items, selection, ..
        } = self;
        selection.select_all_in_folder(items.iter(), folder)
    }

    /// Selected keys still present in the session, in listing order
    pub fn selected_keys(&self) -> Vec<String> {
        self.selection
            .resolve(&self.items)
            .into_iter()
            .map(|item| item.key().to_string())
            .collect()
    }

    // ------------------------------------------------------------------
    // Import payload
    // ------------------------------------------------------------------

    /// Resolve the label for an item.
    ///
    /// Manual label (or a pool typed into the draft) wins, then the item's
    /// detection, then the cache, then the session default.
    pub fn resolve_label(&self, item: &ImportableItem) -> ResolvedLabel {
        if let Some(label) = item.manual_label.as_ref().or(item.draft.pool.as_ref()) {
            return ResolvedLabel {
                label: label.clone(),
                ai_confidence: None,
            };
        }

        let detected = item
            .detection
            .as_ref()
            .or_else(|| self.detections.get(item.key()));

        match detected {
            Some(result) => ResolvedLabel {
                label: result.label.clone(),
                ai_confidence: Some(result.confidence),
            },
            None => ResolvedLabel {
                label: self.default_label.clone(),
                ai_confidence: None,
            },
        }
    }

    /// Build the commit payload for the given keys, in listing order.
    /// Unknown keys are ignored.
    pub fn import_payload(&self, keys: &[String]) -> Vec<ImportFile> {
        let wanted: BTreeSet<&str> = keys.iter().map(String::as_str).collect();

        self.items
            .iter()
            .filter(|item| wanted.contains(item.key()))
            .map(|item| self.import_file(item))
            .collect()
    }

    fn import_file(&self, item: &ImportableItem) -> ImportFile {
        let detected = item
            .detection
            .as_ref()
            .or_else(|| self.detections.get(item.key()));
        let ResolvedLabel {
            label,
            ai_confidence,
        } = self.resolve_label(item);
        let draft = &item.draft;

        ImportFile {
            key: item.file.key.clone(),
            url: item.file.url.clone(),
            size: item.file.size,
            filename: item.file.filename.clone(),
            song_name: draft.song_name.clone(),
            artist: draft.artist.clone(),
            style: draft
                .style
                .clone()
                .or_else(|| detected.map(|d| d.style.clone())),
            version: draft.version.clone(),
            image_url: draft
                .image_url
                .clone()
                .or_else(|| detected.and_then(|d| d.cover_image.clone())),
            preview_url: draft.preview_url.clone(),
            download_url: draft.download_url.clone(),
            release_date: draft.release_date,
            pool: label,
            ai_confidence,
        }
    }

    /// Drop items by key. The selection is left alone.
    pub fn remove(&mut self, keys: &[String]) -> usize {
        let doomed: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
        let before = self.items.len();
        self.items.retain(|item| !doomed.contains(item.key()));
        self.reindex();
        before - self.items.len()
    }

    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.key().to_string(), i))
            .collect();
    }
}
