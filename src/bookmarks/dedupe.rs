//! Same-URL duplicate detection and removal.
//!
//! Unlike the importer, which keys on `url|title`, removal treats any two
//! bookmarks with the same URL as duplicates regardless of title.

use std::collections::HashSet;

use tracing::{debug, info};

use super::{BookmarkNode, BookmarkStore, StoreError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DuplicateRemovalResult {
    pub removed_count: usize,
    /// Distinct bookmarks examined; repeated ids count once
    pub processed_count: usize,
}

/// Every bookmark whose URL was already seen earlier in `bookmarks`.
///
/// The first occurrence of each URL is kept. Folders are ignored. A node
/// listed twice (an overlapping folder selection) is the same bookmark, so
/// repeats of an id are skipped before the URL is compared.
pub fn find_duplicates(bookmarks: &[BookmarkNode]) -> Vec<&BookmarkNode> {
    let mut seen_ids = HashSet::new();
    let mut seen_urls = HashSet::new();
    bookmarks
        .iter()
        .filter(|node| {
            if !seen_ids.insert(node.id.as_str()) {
                return false;
            }
            match node.url.as_deref() {
                Some(url) => !seen_urls.insert(url),
                None => false,
            }
        })
        .collect()
}

fn distinct_count(bookmarks: &[BookmarkNode]) -> usize {
    bookmarks
        .iter()
        .map(|node| node.id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Delete the duplicates in `bookmarks` from the store, one call each.
///
/// Stops at the first failed removal; earlier removals stay applied.
pub fn remove_duplicates(
    store: &mut dyn BookmarkStore,
    bookmarks: &[BookmarkNode],
) -> Result<DuplicateRemovalResult, StoreError> {
    let duplicates = find_duplicates(bookmarks);
    for duplicate in &duplicates {
        debug!(id = %duplicate.id, url = ?duplicate.url, "removing duplicate");
        store.remove(&duplicate.id)?;
    }

    let result = DuplicateRemovalResult {
        removed_count: duplicates.len(),
        processed_count: distinct_count(bookmarks),
    };
    info!(removed = result.removed_count, processed = result.processed_count, "duplicates removed");
    Ok(result)
}
