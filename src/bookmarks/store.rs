//! File-backed bookmark store using the Chromium `Bookmarks` JSON layout.
//!
//! The permanent roots (`bookmark_bar`, `other`, `synced`) hang off the
//! invisible root folder [`ROOT_ID`]. Fields this store does not interpret
//! (`guid`, `meta_info`, `date_last_used`, ...) are carried through untouched.
//! Mutations only touch memory; call [`ChromiumStore::save`] to write them out.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::{BookmarkNode, BookmarkStore, NewBookmark, StoreError, ROOT_ID};

/// Microseconds between 1601-01-01 (Windows epoch) and the Unix epoch
const WINDOWS_EPOCH_OFFSET_MICROS: i64 = 11_644_473_600_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum NodeKind {
    Url,
    Folder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredNode {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_added: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<StoredNode>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl StoredNode {
    fn folder(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: NodeKind::Folder,
            url: None,
            date_added: Some(chromium_now()),
            children: Some(Vec::new()),
            extra: Map::new(),
        }
    }

    fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    fn to_node(&self, parent_id: &str, deep: bool) -> BookmarkNode {
        let children = match (&self.children, self.is_folder() && deep) {
            (Some(children), true) => {
                Some(children.iter().map(|c| c.to_node(&self.id, true)).collect())
            }
            (None, true) => Some(Vec::new()),
            _ => None,
        };
        BookmarkNode {
            id: self.id.clone(),
            title: self.name.clone(),
            url: match self.kind {
                NodeKind::Url => Some(self.url.clone().unwrap_or_default()),
                NodeKind::Folder => None,
            },
            children,
            parent_id: Some(parent_id.to_string()),
        }
    }

    fn max_id(&self) -> u64 {
        let own = self.id.parse().unwrap_or(0);
        self.children
            .iter()
            .flatten()
            .map(StoredNode::max_id)
            .fold(own, u64::max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Roots {
    bookmark_bar: StoredNode,
    other: StoredNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    synced: Option<StoredNode>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookmarksFile {
    roots: Roots,
    #[serde(default = "default_version")]
    version: u32,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn default_version() -> u32 {
    1
}

impl Default for BookmarksFile {
    fn default() -> Self {
        Self {
            roots: Roots {
                bookmark_bar: StoredNode::folder("1", "Bookmarks bar"),
                other: StoredNode::folder("2", "Other bookmarks"),
                synced: Some(StoredNode::folder("3", "Mobile bookmarks")),
                extra: Map::new(),
            },
            version: default_version(),
            extra: Map::new(),
        }
    }
}

/// Current time as a Chromium timestamp string (microseconds since 1601)
fn chromium_now() -> String {
    (chrono::Utc::now().timestamp_micros() + WINDOWS_EPOCH_OFFSET_MICROS).to_string()
}

fn locate<'a>(node: &'a StoredNode, parent_id: &'a str, id: &str) -> Option<(&'a StoredNode, &'a str)> {
    if node.id == id {
        return Some((node, parent_id));
    }
    node.children
        .as_deref()?
        .iter()
        .find_map(|child| locate(child, &node.id, id))
}

fn locate_mut<'a>(node: &'a mut StoredNode, id: &str) -> Option<&'a mut StoredNode> {
    if node.id == id {
        return Some(node);
    }
    node.children
        .as_mut()?
        .iter_mut()
        .find_map(|child| locate_mut(child, id))
}

fn detach(node: &mut StoredNode, id: &str) -> bool {
    let Some(children) = node.children.as_mut() else {
        return false;
    };
    if let Some(pos) = children.iter().position(|c| c.id == id) {
        children.remove(pos);
        return true;
    }
    children.iter_mut().any(|child| detach(child, id))
}

/// Bookmark store backed by a Chromium-format JSON file (or nothing, in tests).
#[derive(Debug)]
pub struct ChromiumStore {
    file: BookmarksFile,
    /// Backing file; `None` keeps everything in memory
    path: Option<PathBuf>,
    next_id: u64,
    dirty: bool,
}

impl ChromiumStore {
    /// Create an empty store that is never written to disk
    pub fn in_memory() -> Self {
        Self::from_file(BookmarksFile::default(), None)
    }

    /// Open the store at `path`, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let file = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            debug!(path = %path.display(), "bookmarks file missing, starting empty");
            BookmarksFile::default()
        };
        Ok(Self::from_file(file, Some(path)))
    }

    /// Parse an in-memory store from Chromium `Bookmarks` JSON
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(Self::from_file(serde_json::from_str(json)?, None))
    }

    fn from_file(file: BookmarksFile, path: Option<PathBuf>) -> Self {
        let next_id = file.roots_iter().map(StoredNode::max_id).max().unwrap_or(0) + 1;
        Self {
            file,
            path,
            next_id,
            dirty: false,
        }
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether there are mutations not yet written by [`save`](Self::save)
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write pending changes to the backing file
    pub fn save(&mut self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            self.dirty = false;
            return Ok(());
        };
        if !self.dirty && path.exists() {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        // The checksum covers the old contents; Chromium recomputes it when absent.
        self.file.extra.remove("checksum");
        let content = serde_json::to_string_pretty(&self.file)?;
        fs::write(path, content)?;
        self.dirty = false;
        debug!(path = %path.display(), "bookmarks saved");
        Ok(())
    }

    /// Re-read the backing file, discarding unsaved changes
    pub fn reload(&mut self) -> Result<(), StoreError> {
        if let Some(path) = self.path.clone() {
            *self = Self::open(path)?;
        }
        Ok(())
    }

    fn locate(&self, id: &str) -> Option<(&StoredNode, &str)> {
        self.file
            .roots_iter()
            .find_map(|root| locate(root, ROOT_ID, id))
    }

    fn is_permanent(&self, id: &str) -> bool {
        self.file.roots_iter().any(|root| root.id == id)
    }

    fn root_node(&self, deep: bool) -> BookmarkNode {
        BookmarkNode {
            id: ROOT_ID.to_string(),
            title: String::new(),
            url: None,
            children: deep.then(|| {
                self.file
                    .roots_iter()
                    .map(|root| root.to_node(ROOT_ID, true))
                    .collect()
            }),
            parent_id: None,
        }
    }
}

impl BookmarksFile {
    fn roots_iter(&self) -> impl Iterator<Item = &StoredNode> {
        [Some(&self.roots.bookmark_bar), Some(&self.roots.other), self.roots.synced.as_ref()]
            .into_iter()
            .flatten()
    }

    fn roots_iter_mut(&mut self) -> impl Iterator<Item = &mut StoredNode> {
        [
            Some(&mut self.roots.bookmark_bar),
            Some(&mut self.roots.other),
            self.roots.synced.as_mut(),
        ]
        .into_iter()
        .flatten()
    }
}

impl BookmarkStore for ChromiumStore {
    fn get_children(&self, folder_id: &str) -> Result<Vec<BookmarkNode>, StoreError> {
        if folder_id == ROOT_ID {
            return Ok(self
                .file
                .roots_iter()
                .map(|root| root.to_node(ROOT_ID, false))
                .collect());
        }
        let (node, _) = self
            .locate(folder_id)
            .ok_or_else(|| StoreError::NotFound(folder_id.to_string()))?;
        Ok(node
            .children
            .iter()
            .flatten()
            .map(|child| child.to_node(&node.id, false))
            .collect())
    }

    fn get(&self, id: &str) -> Result<BookmarkNode, StoreError> {
        if id == ROOT_ID {
            return Ok(self.root_node(false));
        }
        self.locate(id)
            .map(|(node, parent_id)| node.to_node(parent_id, false))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn get_tree(&self) -> Result<Vec<BookmarkNode>, StoreError> {
        Ok(vec![self.root_node(true)])
    }

    fn create(&mut self, bookmark: NewBookmark) -> Result<BookmarkNode, StoreError> {
        if bookmark.parent_id == ROOT_ID {
            return Err(StoreError::Rejected(
                "Can't modify the root bookmark folders".to_string(),
            ));
        }

        let id = self.next_id.to_string();
        let node = StoredNode {
            id: id.clone(),
            name: bookmark.title,
            kind: if bookmark.url.is_some() {
                NodeKind::Url
            } else {
                NodeKind::Folder
            },
            children: bookmark.url.is_none().then(Vec::new),
            url: bookmark.url,
            date_added: Some(chromium_now()),
            extra: Map::new(),
        };

        let parent = self
            .file
            .roots_iter_mut()
            .find_map(|root| locate_mut(root, &bookmark.parent_id))
            .ok_or_else(|| StoreError::NotFound(bookmark.parent_id.clone()))?;
        if !parent.is_folder() {
            return Err(StoreError::Rejected(format!(
                "Parent {} is not a folder",
                bookmark.parent_id
            )));
        }

        let created = node.to_node(&parent.id, true);
        parent.children.get_or_insert_with(Vec::new).push(node);
        self.next_id += 1;
        self.dirty = true;
        debug!(id = %id, parent = %bookmark.parent_id, "created node");
        Ok(created)
    }

    fn remove(&mut self, id: &str) -> Result<(), StoreError> {
        if id == ROOT_ID || self.is_permanent(id) {
            return Err(StoreError::Rejected(
                "Can't modify the root bookmark folders".to_string(),
            ));
        }
        let (node, _) = self
            .locate(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if node.children.as_ref().is_some_and(|c| !c.is_empty()) {
            return Err(StoreError::Rejected(
                "Can't remove non-empty folder".to_string(),
            ));
        }

        let removed = self.file.roots_iter_mut().any(|root| detach(root, id));
        if removed {
            self.dirty = true;
            debug!(id = %id, "removed node");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "checksum": "abc123",
        "roots": {
            "bookmark_bar": {
                "id": "1", "name": "Bookmarks bar", "type": "folder",
                "guid": "0bc5d13f-2cba-5d74-951f-3f233fe6c908",
                "children": [
                    { "id": "5", "name": "Rust", "type": "url", "url": "https://www.rust-lang.org/" },
                    { "id": "6", "name": "News", "type": "folder", "children": [
                        { "id": "7", "name": "HN", "type": "url", "url": "https://news.ycombinator.com/" }
                    ] }
                ]
            },
            "other": { "id": "2", "name": "Other bookmarks", "type": "folder", "children": [] },
            "synced": { "id": "3", "name": "Mobile bookmarks", "type": "folder", "children": [] }
        },
        "version": 1
    }"#;

    #[test]
    fn root_children_are_the_permanent_folders() {
        let store = ChromiumStore::in_memory();
        let roots = store.get_children(ROOT_ID).unwrap();
        let titles: Vec<_> = roots.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["Bookmarks bar", "Other bookmarks", "Mobile bookmarks"]);
        assert!(roots.iter().all(|n| n.parent_id.as_deref() == Some(ROOT_ID)));
    }

    #[test]
    fn get_children_is_shallow_and_ordered() {
        let store = ChromiumStore::from_json(SAMPLE).unwrap();
        let children = store.get_children("1").unwrap();

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].url.as_deref(), Some("https://www.rust-lang.org/"));
        assert_eq!(children[1].title, "News");
        assert!(children[1].is_folder());
        assert!(children[1].children.is_none());
    }

    #[test]
    fn create_appends_with_fresh_ids() {
        let mut store = ChromiumStore::from_json(SAMPLE).unwrap();
        let folder = store.create(NewBookmark::folder("2", "Reading")).unwrap();
        let link = store
            .create(NewBookmark::bookmark(&folder.id, "Docs", "https://docs.rs"))
            .unwrap();

        assert_eq!(folder.id, "8");
        assert_eq!(link.id, "9");
        assert_eq!(link.parent_id.as_deref(), Some("8"));
        assert_eq!(store.get_children("8").unwrap(), vec![BookmarkNode {
            children: None,
            ..link
        }]);
        assert!(store.is_dirty());
    }

    #[test]
    fn create_rejects_root_and_non_folder_parents() {
        let mut store = ChromiumStore::from_json(SAMPLE).unwrap();
        assert!(matches!(
            store.create(NewBookmark::folder(ROOT_ID, "Top")),
            Err(StoreError::Rejected(_))
        ));
        assert!(matches!(
            store.create(NewBookmark::folder("5", "Inside a link")),
            Err(StoreError::Rejected(_))
        ));
        assert!(matches!(
            store.create(NewBookmark::folder("404", "Nowhere")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn remove_refuses_permanent_and_non_empty_folders() {
        let mut store = ChromiumStore::from_json(SAMPLE).unwrap();
        assert!(store.remove("1").is_err());
        assert!(store.remove("6").is_err());

        store.remove("7").unwrap();
        store.remove("6").unwrap();
        assert_eq!(store.get_children("1").unwrap().len(), 1);
        assert!(matches!(store.get("7"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn get_tree_nests_everything_under_root() {
        let store = ChromiumStore::from_json(SAMPLE).unwrap();
        let tree = store.get_tree().unwrap();
        let bar = &tree[0].children()[0];
        assert_eq!(tree[0].id, ROOT_ID);
        assert_eq!(bar.children()[1].children()[0].title, "HN");
        assert_eq!(store.get("7").unwrap().parent_id.as_deref(), Some("6"));
    }

    #[test]
    fn save_round_trips_unknown_fields_and_drops_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bookmarks");
        fs::write(&path, SAMPLE).unwrap();

        let mut store = ChromiumStore::open(&path).unwrap();
        store
            .create(NewBookmark::bookmark("2", "Crates", "https://crates.io"))
            .unwrap();
        store.save().unwrap();
        assert!(!store.is_dirty());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("0bc5d13f-2cba-5d74-951f-3f233fe6c908"));
        assert!(!written.contains("checksum"));

        let reopened = ChromiumStore::open(&path).unwrap();
        assert_eq!(reopened.get_children("2").unwrap()[0].title, "Crates");
    }

    #[test]
    fn open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ChromiumStore::open(dir.path().join("nested").join("Bookmarks")).unwrap();
        assert!(store.get_children("1").unwrap().is_empty());
        store.save().unwrap();
        assert!(dir.path().join("nested").join("Bookmarks").exists());
    }
}
