//! Page-independent multi-selection
//!
//! The selection is a set of keys and outlives paging. Keys whose items have
//! been removed from the collection stay in the set; they have no row to
//! render and [`Selection::resolve`] skips them.

use pool_core::Keyed;
use std::collections::HashSet;

/// What `select_all_visible` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleToggle {
    /// Missing visible keys were added
    Added(usize),
    /// Every visible key was already selected and has been removed
    Removed(usize),
}

/// Set of selected keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    keys: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one key. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.keys.remove(key) {
            false
        } else {
            self.keys.insert(key.to_string());
            true
        }
    }

    /// "Select all" for the current page.
    ///
    /// Adds the visible keys that are missing, leaving off-page selections
    /// alone. When every visible key is already selected, removes exactly the
    /// visible keys instead.
    pub fn select_all_visible<'a, I>(&mut self, visible: I) -> VisibleToggle
    where
        I: IntoIterator<Item = &'a str>,
    {
        let visible: Vec<&str> = visible.into_iter().collect();

        if visible.iter().all(|key| self.keys.contains(*key)) {
            let removed = visible
                .iter()
                .filter(|key| self.keys.remove(**key))
                .count();
            VisibleToggle::Removed(removed)
        } else {
            let added = visible
                .iter()
                .filter(|key| self.keys.insert((**key).to_string()))
                .count();
            VisibleToggle::Added(added)
        }
    }

    /// Replace the selection with every item under `folder`.
    ///
    /// Unlike [`Selection::select_all_visible`] this is a full replace.
    /// Returns the new selection size.
    pub fn select_all_in_folder<T, I>(&mut self, items: I, folder: &str) -> usize
    where
        T: Keyed,
        I: IntoIterator<Item = T>,
    {
        let prefix = format!("{}/", folder);
        self.keys = items
            .into_iter()
            .map(|item| item.selection_key().into_owned())
            .filter(|key| key.starts_with(&prefix))
            .collect();
        self.keys.len()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Selected items that still exist, in collection order
    pub fn resolve<'a, T: Keyed>(&self, items: &'a [T]) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| self.keys.contains(&*item.selection_key()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    struct Row(&'static str);

    impl Keyed for Row {
        fn selection_key(&self) -> Cow<'_, str> {
            Cow::Borrowed(self.0)
        }
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        assert!(selection.toggle("a"));
        assert!(selection.contains("a"));
        assert!(!selection.toggle("a"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_visible_adds_then_removes() {
        let mut selection = Selection::new();
        selection.toggle("off-page");
        selection.toggle("v1");
        selection.toggle("v2");
        selection.toggle("v3");

        let visible = ["v1", "v2", "v3", "v4", "v5"];

        assert_eq!(
            selection.select_all_visible(visible.iter().copied()),
            VisibleToggle::Added(2)
        );
        assert!(visible.iter().all(|k| selection.contains(k)));
        assert!(selection.contains("off-page"));

        assert_eq!(
            selection.select_all_visible(visible.iter().copied()),
            VisibleToggle::Removed(5)
        );
        assert!(visible.iter().all(|k| !selection.contains(k)));
        assert!(selection.contains("off-page"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_select_all_in_folder_replaces() {
        let rows = [
            Row("house/a.mp3"),
            Row("house/b.mp3"),
            Row("housemusic/c.mp3"),
            Row("techno/d.mp3"),
        ];

        let mut selection = Selection::new();
        selection.toggle("techno/d.mp3");

        let count = selection.select_all_in_folder(rows.iter(), "house");

        assert_eq!(count, 2);
        assert!(selection.contains("house/a.mp3"));
        assert!(!selection.contains("housemusic/c.mp3"));
        assert!(!selection.contains("techno/d.mp3"));
    }

    #[test]
    fn test_resolve_skips_removed_items() {
        let mut selection = Selection::new();
        selection.toggle("a");
        selection.toggle("gone");

        let rows = [Row("a"), Row("b")];
        let resolved = selection.resolve(&rows);

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].0, "a");
        assert!(selection.contains("gone"));
    }
}
