//! Per-run snapshot of what already exists under each visited folder.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use super::BookmarkStore;

/// Direct children of one folder, as seen when it was first visited
#[derive(Debug, Clone, Default)]
pub struct FolderCacheEntry {
    /// `url|title` keys of the folder's bookmarks
    pub bookmark_set: HashSet<String>,
    /// Child folder title -> child folder ID
    pub folder_map: HashMap<String, String>,
}

fn bookmark_key(url: &str, title: &str) -> String {
    format!("{url}|{title}")
}

/// Lazily built lookup of folder contents for one import run.
#[derive(Debug, Default)]
pub struct FolderCache {
    entries: HashMap<String, FolderCacheEntry>,
}

impl FolderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot `folder_id`'s direct children, unless already cached.
    ///
    /// A failed read leaves an empty entry: the run continues and may create
    /// items that already exist in that folder.
    pub fn prefetch(&mut self, store: &dyn BookmarkStore, folder_id: &str) {
        if self.entries.contains_key(folder_id) {
            return;
        }

        let mut entry = FolderCacheEntry::default();
        match store.get_children(folder_id) {
            Ok(children) => {
                for child in children {
                    match child.url {
                        Some(url) => {
                            entry.bookmark_set.insert(bookmark_key(&url, &child.title));
                        }
                        None => {
                            // First folder wins when titles repeat
                            entry.folder_map.entry(child.title).or_insert(child.id);
                        }
                    }
                }
            }
            Err(e) => warn!(folder = folder_id, error = %e, "prefetch failed, treating folder as empty"),
        }
        self.entries.insert(folder_id.to_string(), entry);
    }

    /// Register a folder known to be empty, such as one just created
    pub fn insert_empty(&mut self, folder_id: &str) {
        self.entries.insert(folder_id.to_string(), FolderCacheEntry::default());
    }

    pub fn is_cached(&self, folder_id: &str) -> bool {
        self.entries.contains_key(folder_id)
    }

    pub fn has_bookmark(&self, folder_id: &str, url: &str, title: &str) -> bool {
        self.entries
            .get(folder_id)
            .is_some_and(|entry| entry.bookmark_set.contains(&bookmark_key(url, title)))
    }

    pub fn resolve_folder(&self, folder_id: &str, title: &str) -> Option<&str> {
        self.entries
            .get(folder_id)?
            .folder_map
            .get(title)
            .map(String::as_str)
    }

    /// Record a bookmark created under an already cached folder
    pub fn record_bookmark(&mut self, folder_id: &str, url: &str, title: &str) {
        if let Some(entry) = self.entries.get_mut(folder_id) {
            entry.bookmark_set.insert(bookmark_key(url, title));
        }
    }

    /// Record a folder created under an already cached folder
    pub fn record_folder(&mut self, folder_id: &str, title: &str, child_id: &str) {
        if let Some(entry) = self.entries.get_mut(folder_id) {
            entry
                .folder_map
                .entry(title.to_string())
                .or_insert_with(|| child_id.to_string());
        }
    }
}
