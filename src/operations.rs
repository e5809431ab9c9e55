//! Handlers run once the user has picked folders.
//!
//! None of these return `Err`: store, parse and export failures become an
//! unsuccessful [`OperationOutcome`] whose message is shown in the status bar.

use tracing::{error, info};

use crate::bookmarks::{
    collect_bookmarks, fallback_title, remove_duplicates, BookmarkNode, BookmarkStore,
    NewBookmark, StoreError, TreeImporter,
};
use crate::export::{self, ExportFormat};
use crate::parse::ParsedLink;

/// Duplicate removal summary for the results view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    pub removed_count: usize,
    pub processed_count: usize,
    /// (id, title) of each folder that was cleaned
    pub folders: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationOutcome {
    pub success: bool,
    pub message: String,
    /// Text to place on the clipboard (exports only)
    pub clipboard_text: Option<String>,
    /// Set by duplicate removal
    pub report: Option<DuplicateReport>,
}

impl OperationOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Self::default()
        }
    }

    /// Failure with a message shown as-is
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Self::default()
        }
    }

    /// Failure caused by an error, shown as `Error: <error>`
    pub fn error(err: impl std::fmt::Display) -> Self {
        Self::failed(format!("Error: {err}"))
    }
}

fn no_folder_selected() -> OperationOutcome {
    OperationOutcome::failed("Error: No folder selected")
}

/// Bookmark `links` into every selected folder, without duplicate checks
pub fn add_links(
    store: &mut dyn BookmarkStore,
    folder_ids: &[String],
    links: &[ParsedLink],
) -> OperationOutcome {
    if folder_ids.is_empty() {
        return no_folder_selected();
    }
    if links.is_empty() {
        return OperationOutcome::failed("Error: No links to bookmark");
    }

    let result: Result<(), StoreError> = folder_ids.iter().try_for_each(|folder_id| {
        links.iter().try_for_each(|link| {
            let title = if link.title.is_empty() {
                fallback_title(&link.url)
            } else {
                link.title.clone()
            };
            store
                .create(NewBookmark::bookmark(folder_id.as_str(), title, link.url.as_str()))
                .map(|_| ())
        })
    });

    match result {
        Ok(()) => {
            info!(links = links.len(), folders = folder_ids.len(), "links bookmarked");
            OperationOutcome::ok("Tabs successfully bookmarked!")
        }
        Err(e) => {
            error!(error = %e, "bookmarking failed");
            OperationOutcome::error(e)
        }
    }
}

/// Merge an imported tree into every selected folder
pub fn import_bookmarks(
    store: &mut dyn BookmarkStore,
    folder_ids: &[String],
    tree: &[BookmarkNode],
) -> OperationOutcome {
    if folder_ids.is_empty() {
        return no_folder_selected();
    }
    match TreeImporter::new(store).import_tree(tree, folder_ids) {
        Ok(outcome) => {
            info!(?outcome, "import finished");
            OperationOutcome::ok(outcome.summary())
        }
        Err(e) => {
            error!(error = %e, "import aborted");
            OperationOutcome::error(e)
        }
    }
}

/// Render every bookmark under the selected folders for the clipboard
pub fn export_folders(
    store: &dyn BookmarkStore,
    folder_ids: &[String],
    format: ExportFormat,
    playlist_size: usize,
) -> OperationOutcome {
    if folder_ids.is_empty() {
        return no_folder_selected();
    }
    let items = match collect_bookmarks(store, folder_ids) {
        Ok(items) => items,
        Err(e) => return OperationOutcome::error(e),
    };

    match export::format_batched(&items, format, playlist_size) {
        Ok(output) => {
            info!(items = items.len(), ?format, errors = output.error_count, "export rendered");
            OperationOutcome {
                clipboard_text: Some(output.text),
                ..OperationOutcome::ok(output.message)
            }
        }
        Err(e) => OperationOutcome::failed(e.to_string()),
    }
}

/// Remove same-URL duplicates across the selected folders
pub fn remove_duplicates_in(store: &mut dyn BookmarkStore, folder_ids: &[String]) -> OperationOutcome {
    if folder_ids.is_empty() {
        return no_folder_selected();
    }

    let folders = folder_ids
        .iter()
        .map(|id| {
            let name = store
                .get(id)
                .map(|node| node.title)
                .unwrap_or_else(|_| "Unknown folder".to_string());
            (id.clone(), name)
        })
        .collect();

    let result = collect_bookmarks(store, folder_ids)
        .and_then(|bookmarks| remove_duplicates(store, &bookmarks));
    match result {
        Ok(result) => {
            let report = DuplicateReport {
                removed_count: result.removed_count,
                processed_count: result.processed_count,
                folders,
            };
            OperationOutcome {
                report: Some(report),
                ..OperationOutcome::ok(format!(
                    "Removed {} duplicates from {} bookmarks",
                    result.removed_count, result.processed_count
                ))
            }
        }
        Err(e) => {
            error!(error = %e, "duplicate removal failed");
            OperationOutcome::error(e)
        }
    }
}

/// Create a folder named `name` (trimmed) under `parent_id`
pub fn create_folder(store: &mut dyn BookmarkStore, parent_id: &str, name: &str) -> OperationOutcome {
    let name = name.trim();
    if name.is_empty() {
        return OperationOutcome::failed("Folder name cannot be empty");
    }
    match store.create(NewBookmark::folder(parent_id, name)) {
        Ok(folder) => {
            info!(id = %folder.id, parent = parent_id, "folder created");
            OperationOutcome::ok(format!("Created folder \"{name}\""))
        }
        Err(e) => OperationOutcome::error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmarks::ChromiumStore;

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn link(title: &str, url: &str) -> ParsedLink {
        ParsedLink {
            title: title.into(),
            url: url.into(),
        }
    }

    #[test]
    fn add_links_creates_in_every_folder() {
        let mut store = ChromiumStore::in_memory();
        let outcome = add_links(
            &mut store,
            &ids(&["1", "2"]),
            &[link("A", "https://a.example"), link("", "https://b.example/x")],
        );

        assert!(outcome.success);
        assert_eq!(outcome.message, "Tabs successfully bookmarked!");
        for folder in ["1", "2"] {
            let titles: Vec<_> = store
                .get_children(folder)
                .unwrap()
                .into_iter()
                .map(|n| n.title)
                .collect();
            assert_eq!(titles, ["A", "b.example"]);
        }
    }

    #[test]
    fn add_links_reports_store_errors() {
        let mut store = ChromiumStore::in_memory();
        let outcome = add_links(&mut store, &ids(&["42"]), &[link("A", "https://a.example")]);
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("Error: "));
    }

    #[test]
    fn export_of_empty_folder_is_not_a_success() {
        let store = ChromiumStore::in_memory();
        let outcome = export_folders(&store, &ids(&["1"]), ExportFormat::Urls, 50);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Error: No links found in folder");
        assert!(outcome.clipboard_text.is_none());
    }

    #[test]
    fn export_returns_clipboard_text() {
        let mut store = ChromiumStore::in_memory();
        add_links(&mut store, &ids(&["1"]), &[link("A", "https://a.example")]);

        let outcome = export_folders(&store, &ids(&["1"]), ExportFormat::Markdown, 50);
        assert!(outcome.success);
        assert_eq!(outcome.clipboard_text.as_deref(), Some("[A](https://a.example)"));
    }

    #[test]
    fn import_merges_into_selected_folder() {
        let mut store = ChromiumStore::in_memory();
        let tree = vec![BookmarkNode::folder(
            "imported-1",
            "Imported Bookmarks",
            vec![BookmarkNode::bookmark("imported-2", "A", "https://a.example")],
        )];

        let first = import_bookmarks(&mut store, &ids(&["1"]), &tree);
        let second = import_bookmarks(&mut store, &ids(&["1"]), &tree);

        assert_eq!(first.message, "Imported 1 bookmark and 1 new folder");
        assert_eq!(second.message, "Imported 0 bookmarks and 0 new folders (1 duplicates skipped)");
    }

    #[test]
    fn duplicate_removal_reports_folder_names() {
        let mut store = ChromiumStore::in_memory();
        add_links(
            &mut store,
            &ids(&["1"]),
            &[link("X", "a"), link("Y", "a"), link("Z", "b")],
        );

        let outcome = remove_duplicates_in(&mut store, &ids(&["1"]));
        let report = outcome.report.unwrap();

        assert_eq!(report.removed_count, 1);
        assert_eq!(report.processed_count, 3);
        assert_eq!(report.folders, vec![("1".to_string(), "Bookmarks bar".to_string())]);
    }

    #[test]
    fn blank_folder_name_is_refused() {
        let mut store = ChromiumStore::in_memory();
        assert!(!create_folder(&mut store, "1", "   ").success);
        assert!(create_folder(&mut store, "1", " Reading ").success);
        assert_eq!(store.get_children("1").unwrap()[0].title, "Reading");
    }

    #[test]
    fn nothing_runs_without_a_folder() {
        let mut store = ChromiumStore::in_memory();
        assert!(!import_bookmarks(&mut store, &[], &[]).success);
        assert!(!remove_duplicates_in(&mut store, &[]).success);
    }
}
