//! Merge engine: writes an externally sourced bookmark tree into the store.
//!
//! Existing folders are reused by title and bookmarks whose `url|title`
//! already exists in the same folder are skipped. Folders created during the
//! run are known to be empty, so their descendants skip the duplicate check.
//! The walk is depth-first and strictly sequential; the first store failure
//! aborts it, leaving everything created so far in place.

use tracing::{debug, info};

use super::cache::FolderCache;
use super::{fallback_title, BookmarkNode, BookmarkStore, NewBookmark, StoreError, ROOT_ID};

/// Title given to imported folders that have none
pub const FALLBACK_FOLDER_TITLE: &str = "Imported Folder";

/// Counters for one merge run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Number of destinations the tree was written into
    pub destinations: usize,
    pub bookmarks_created: usize,
    pub folders_created: usize,
    pub folders_reused: usize,
    pub duplicates_skipped: usize,
}

impl ImportOutcome {
    /// One-line summary for the status bar
    pub fn summary(&self) -> String {
        let mut message = format!(
            "Imported {} bookmark{} and {} new folder{}",
            self.bookmarks_created,
            if self.bookmarks_created == 1 { "" } else { "s" },
            self.folders_created,
            if self.folders_created == 1 { "" } else { "s" },
        );
        if self.destinations > 1 {
            message.push_str(&format!(" into {} folders", self.destinations));
        }
        if self.duplicates_skipped > 0 {
            message.push_str(&format!(" ({} duplicates skipped)", self.duplicates_skipped));
        }
        message
    }
}

/// One merge run. Owns the folder cache for the duration of the run.
pub struct TreeImporter<'s> {
    store: &'s mut dyn BookmarkStore,
    cache: FolderCache,
    outcome: ImportOutcome,
}

impl<'s> TreeImporter<'s> {
    pub fn new(store: &'s mut dyn BookmarkStore) -> Self {
        Self::with_cache(store, FolderCache::new())
    }

    /// Start a run with a pre-populated cache
    pub fn with_cache(store: &'s mut dyn BookmarkStore, cache: FolderCache) -> Self {
        Self {
            store,
            cache,
            outcome: ImportOutcome::default(),
        }
    }

    /// Merge `root_children` into every folder in `destination_ids`, in order.
    ///
    /// With no destinations the tree is merged at the top level of the store.
    pub fn import_tree(
        mut self,
        root_children: &[BookmarkNode],
        destination_ids: &[String],
    ) -> Result<ImportOutcome, StoreError> {
        if destination_ids.is_empty() {
            self.import_nodes(root_children, None, false)?;
            self.outcome.destinations = 1;
        }
        for destination in destination_ids {
            info!(destination = %destination, nodes = root_children.len(), "importing tree");
            self.import_nodes(root_children, Some(destination), false)?;
            self.outcome.destinations += 1;
        }
        Ok(self.outcome)
    }

    fn import_nodes(
        &mut self,
        nodes: &[BookmarkNode],
        parent: Option<&str>,
        skip_duplicate_check: bool,
    ) -> Result<(), StoreError> {
        let parent_id = parent.unwrap_or(ROOT_ID);
        for node in nodes {
            match &node.url {
                Some(url) => self.import_bookmark(node, url, parent_id, skip_duplicate_check)?,
                None => {
                    let (folder_id, is_new) = self.resolve_folder(node, parent_id)?;
                    self.import_nodes(node.children(), Some(&folder_id), is_new)?;
                }
            }
        }
        Ok(())
    }

    fn import_bookmark(
        &mut self,
        node: &BookmarkNode,
        url: &str,
        parent_id: &str,
        skip_duplicate_check: bool,
    ) -> Result<(), StoreError> {
        let title = if node.title.is_empty() {
            fallback_title(url)
        } else {
            node.title.clone()
        };

        if !skip_duplicate_check {
            self.cache.prefetch(&*self.store, parent_id);
            if self.cache.has_bookmark(parent_id, url, &title) {
                debug!(url, parent = parent_id, "skipping duplicate bookmark");
                self.outcome.duplicates_skipped += 1;
                return Ok(());
            }
        }

        self.store
            .create(NewBookmark::bookmark(parent_id, title.as_str(), url))?;
        self.cache.record_bookmark(parent_id, url, &title);
        self.outcome.bookmarks_created += 1;
        Ok(())
    }

    /// Returns the folder to import into and whether it was created by this call
    fn resolve_folder(
        &mut self,
        node: &BookmarkNode,
        parent_id: &str,
    ) -> Result<(String, bool), StoreError> {
        let title = if node.title.is_empty() {
            FALLBACK_FOLDER_TITLE
        } else {
            node.title.as_str()
        };

        self.cache.prefetch(&*self.store, parent_id);
        if let Some(existing) = self.cache.resolve_folder(parent_id, title) {
            self.outcome.folders_reused += 1;
            return Ok((existing.to_string(), false));
        }

        let created = self.store.create(NewBookmark::folder(parent_id, title))?;
        self.cache.record_folder(parent_id, title, &created.id);
        self.cache.insert_empty(&created.id);
        self.outcome.folders_created += 1;
        debug!(folder = %created.id, title, "created folder");
        Ok((created.id, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmarks::ChromiumStore;

    fn titles(store: &ChromiumStore, folder: &str) -> Vec<String> {
        store
            .get_children(folder)
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect()
    }

    fn child_id(store: &ChromiumStore, folder: &str, title: &str) -> String {
        store
            .get_children(folder)
            .unwrap()
            .into_iter()
            .find(|n| n.title == title)
            .map(|n| n.id)
            .unwrap()
    }

    fn import(store: &mut ChromiumStore, tree: &[BookmarkNode], dest: &[&str]) -> ImportOutcome {
        let dest: Vec<String> = dest.iter().map(|d| d.to_string()).collect();
        TreeImporter::new(store).import_tree(tree, &dest).unwrap()
    }

    #[test]
    fn existing_identical_bookmark_is_not_recreated() {
        let mut store = ChromiumStore::in_memory();
        store
            .create(NewBookmark::bookmark("1", "Rust", "https://www.rust-lang.org"))
            .unwrap();

        let tree = vec![BookmarkNode::bookmark("imported-2", "Rust", "https://www.rust-lang.org")];
        let outcome = import(&mut store, &tree, &["1"]);

        assert_eq!(outcome.bookmarks_created, 0);
        assert_eq!(outcome.duplicates_skipped, 1);
        assert_eq!(titles(&store, "1"), ["Rust"]);
    }

    #[test]
    fn same_url_with_different_title_is_created() {
        let mut store = ChromiumStore::in_memory();
        store
            .create(NewBookmark::bookmark("1", "Rust", "https://www.rust-lang.org"))
            .unwrap();

        let tree = vec![BookmarkNode::bookmark("imported-2", "Rust home", "https://www.rust-lang.org")];
        let outcome = import(&mut store, &tree, &["1"]);

        assert_eq!(outcome.bookmarks_created, 1);
        assert_eq!(titles(&store, "1"), ["Rust", "Rust home"]);
    }

    #[test]
    fn existing_folder_is_reused_and_its_contents_checked() {
        let mut store = ChromiumStore::in_memory();
        let news = store.create(NewBookmark::folder("1", "News")).unwrap();
        store
            .create(NewBookmark::bookmark(&news.id, "HN", "https://news.ycombinator.com"))
            .unwrap();

        let tree = vec![BookmarkNode::folder(
            "imported-2",
            "News",
            vec![
                BookmarkNode::bookmark("imported-3", "HN", "https://news.ycombinator.com"),
                BookmarkNode::bookmark("imported-4", "LWN", "https://lwn.net"),
            ],
        )];
        let outcome = import(&mut store, &tree, &["1"]);

        assert_eq!(outcome.folders_reused, 1);
        assert_eq!(outcome.folders_created, 0);
        assert_eq!(titles(&store, "1"), ["News"]);
        assert_eq!(titles(&store, &news.id), ["HN", "LWN"]);
    }

    #[test]
    fn repeated_folder_in_one_run_is_created_once() {
        let mut store = ChromiumStore::in_memory();
        let tree = vec![
            BookmarkNode::folder("imported-2", "Docs", vec![BookmarkNode::bookmark("imported-3", "A", "https://a.example")]),
            BookmarkNode::folder("imported-4", "Docs", vec![BookmarkNode::bookmark("imported-5", "B", "https://b.example")]),
        ];
        let outcome = import(&mut store, &tree, &["2"]);

        assert_eq!(outcome.folders_created, 1);
        assert_eq!(outcome.folders_reused, 1);
        assert_eq!(titles(&store, "2"), ["Docs"]);
        let docs = child_id(&store, "2", "Docs");
        assert_eq!(titles(&store, &docs), ["A", "B"]);
    }

    #[test]
    fn new_folder_children_skip_duplicate_suppression() {
        let mut store = ChromiumStore::in_memory();
        let tree = vec![BookmarkNode::folder(
            "imported-2",
            "Fresh",
            vec![
                BookmarkNode::bookmark("imported-3", "A", "https://a.example"),
                BookmarkNode::bookmark("imported-4", "A", "https://a.example"),
            ],
        )];
        let outcome = import(&mut store, &tree, &["1"]);

        let fresh = child_id(&store, "1", "Fresh");
        assert_eq!(outcome.bookmarks_created, 2);
        assert_eq!(titles(&store, &fresh), ["A", "A"]);
    }

    #[test]
    fn siblings_in_existing_folder_see_each_other() {
        let mut store = ChromiumStore::in_memory();
        let tree = vec![
            BookmarkNode::bookmark("imported-2", "A", "https://a.example"),
            BookmarkNode::bookmark("imported-3", "A", "https://a.example"),
        ];
        let outcome = import(&mut store, &tree, &["1"]);

        assert_eq!(outcome.bookmarks_created, 1);
        assert_eq!(outcome.duplicates_skipped, 1);
    }

    #[test]
    fn missing_titles_fall_back() {
        let mut store = ChromiumStore::in_memory();
        let tree = vec![BookmarkNode::folder(
            "imported-2",
            "",
            vec![BookmarkNode::bookmark("imported-3", "", "https://example.com/page")],
        )];
        import(&mut store, &tree, &["1"]);

        let folder = child_id(&store, "1", FALLBACK_FOLDER_TITLE);
        assert_eq!(titles(&store, &folder), ["example.com"]);
    }

    #[test]
    fn tree_is_replicated_into_each_destination() {
        let mut store = ChromiumStore::in_memory();
        let tree = vec![BookmarkNode::folder(
            "imported-2",
            "Shared",
            vec![BookmarkNode::bookmark("imported-3", "A", "https://a.example")],
        )];
        let outcome = import(&mut store, &tree, &["1", "2"]);

        assert_eq!(outcome.destinations, 2);
        assert_eq!(outcome.folders_created, 2);
        for dest in ["1", "2"] {
            let shared = child_id(&store, dest, "Shared");
            assert_eq!(titles(&store, &shared), ["A"]);
        }
    }

    #[test]
    fn second_run_creates_nothing_new() {
        let mut store = ChromiumStore::in_memory();
        let tree = vec![BookmarkNode::folder(
            "imported-2",
            "Shared",
            vec![BookmarkNode::bookmark("imported-3", "A", "https://a.example")],
        )];
        import(&mut store, &tree, &["1"]);
        let again = import(&mut store, &tree, &["1"]);

        assert_eq!(again.folders_created, 0);
        assert_eq!(again.bookmarks_created, 0);
        assert_eq!(again.duplicates_skipped, 1);
    }

    #[test]
    fn store_failure_aborts_but_keeps_committed_work() {
        let mut store = ChromiumStore::in_memory();
        let tree = vec![
            BookmarkNode::bookmark("imported-2", "A", "https://a.example"),
            BookmarkNode::bookmark("imported-3", "B", "https://b.example"),
        ];
        let dest = vec!["1".to_string(), "404".to_string()];
        let result = TreeImporter::new(&mut store).import_tree(&tree, &dest);

        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == "404"));
        assert_eq!(titles(&store, "1"), ["A", "B"]);
    }

    #[test]
    fn empty_destination_list_targets_the_store_root() {
        let mut store = ChromiumStore::in_memory();
        let tree = vec![BookmarkNode::folder("imported-1", "Bookmarks bar", vec![
            BookmarkNode::bookmark("imported-2", "A", "https://a.example"),
        ])];
        let outcome = TreeImporter::new(&mut store).import_tree(&tree, &[]).unwrap();

        assert_eq!(outcome.folders_reused, 1);
        assert_eq!(titles(&store, "1"), ["A"]);

        let stray = vec![BookmarkNode::bookmark("imported-3", "B", "https://b.example")];
        assert!(TreeImporter::new(&mut store).import_tree(&stray, &[]).is_err());
    }

    #[test]
    fn summary_mentions_skips_and_destinations() {
        let outcome = ImportOutcome {
            destinations: 2,
            bookmarks_created: 1,
            folders_created: 3,
            folders_reused: 0,
            duplicates_skipped: 4,
        };
        assert_eq!(
            outcome.summary(),
            "Imported 1 bookmark and 3 new folders into 2 folders (4 duplicates skipped)"
        );
    }
}
