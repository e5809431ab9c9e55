//! Bookmark tree model and the store abstraction the merge engine runs against.
//!
//! A node with a `url` is a bookmark; a node without one is a folder. Every
//! operation in this crate reaches the live bookmark database only through
//! [`BookmarkStore`], so the engine can run against a Chromium `Bookmarks`
//! file or an in-memory tree in tests.

use serde::{Deserialize, Serialize};

pub mod cache;
pub mod dedupe;
pub mod flatten;
pub mod importer;
pub mod store;

pub use cache::FolderCache;
pub use dedupe::{find_duplicates, remove_duplicates, DuplicateRemovalResult};
pub use flatten::collect_bookmarks;
pub use importer::{ImportOutcome, TreeImporter};
pub use store::ChromiumStore;

/// ID of the invisible top-level folder that holds the permanent roots.
pub const ROOT_ID: &str = "0";

/// A bookmark or folder in any tree, live or imported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkNode {
    /// Unique within its tree
    pub id: String,
    /// Human-readable label
    #[serde(default)]
    pub title: String,
    /// Present on bookmarks only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Folder contents, in order. `None` when the tree was captured shallowly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,
    /// Set once the node is placed under a folder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl BookmarkNode {
    /// Create a bookmark node
    pub fn bookmark(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: Some(url.into()),
            children: None,
            parent_id: None,
        }
    }

    /// Create a folder node with the given contents
    pub fn folder(id: impl Into<String>, title: impl Into<String>, children: Vec<BookmarkNode>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: None,
            children: Some(children),
            parent_id: None,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.url.is_none()
    }

    /// Folder contents, or an empty slice for bookmarks and shallow folders
    pub fn children(&self) -> &[BookmarkNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Arguments to [`BookmarkStore::create`]. Omitting `url` creates a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub parent_id: String,
    pub title: String,
    pub url: Option<String>,
}

impl NewBookmark {
    pub fn bookmark(parent_id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            title: title.into(),
            url: Some(url.into()),
        }
    }

    pub fn folder(parent_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            title: title.into(),
            url: None,
        }
    }
}

/// Failure of a single store primitive.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Can't find bookmark for id {0}")]
    NotFound(String),
    #[error("{0}")]
    Rejected(String),
    #[error("failed to access bookmarks file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid bookmarks file: {0}")]
    Json(#[from] serde_json::Error),
}

/// The host bookmark database.
///
/// Each call is independent and non-transactional: a failure part way through
/// a multi-call operation leaves earlier calls committed.
pub trait BookmarkStore {
    /// Direct children of a folder, in store order. Returned folders are shallow.
    fn get_children(&self, folder_id: &str) -> Result<Vec<BookmarkNode>, StoreError>;

    /// A single node, without its children
    fn get(&self, id: &str) -> Result<BookmarkNode, StoreError>;

    /// The whole tree, as a single-element list holding the root folder
    fn get_tree(&self) -> Result<Vec<BookmarkNode>, StoreError>;

    /// Append a bookmark or folder to the end of `parent_id`
    fn create(&mut self, bookmark: NewBookmark) -> Result<BookmarkNode, StoreError>;

    /// Remove a bookmark or an empty folder
    fn remove(&mut self, id: &str) -> Result<(), StoreError>;
}

/// Title to use for a bookmark that has none: the URL's hostname, or the URL
/// itself when it has no host.
pub fn fallback_title(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_owned))
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| url.to_string())
}
