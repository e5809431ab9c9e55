//! Recursive collection of every bookmark under a set of folders.

use super::{BookmarkNode, BookmarkStore, StoreError};

/// All bookmarks below `folder_ids`, depth-first in store order.
///
/// Folders are visited in the order given. Nothing is de-duplicated, so a
/// bookmark under two selected folders (or a folder selected together with
/// its parent) appears more than once.
pub fn collect_bookmarks(
    store: &dyn BookmarkStore,
    folder_ids: &[String],
) -> Result<Vec<BookmarkNode>, StoreError> {
    let mut bookmarks = Vec::new();
    for folder_id in folder_ids {
        collect_into(store, folder_id, &mut bookmarks)?;
    }
    Ok(bookmarks)
}

fn collect_into(
    store: &dyn BookmarkStore,
    folder_id: &str,
    out: &mut Vec<BookmarkNode>,
) -> Result<(), StoreError> {
    for child in store.get_children(folder_id)? {
        if child.is_folder() {
            collect_into(store, &child.id, out)?;
        } else {
            out.push(child);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmarks::{ChromiumStore, NewBookmark};

    #[test]
    fn collects_nested_bookmarks_in_order() {
        let mut store = ChromiumStore::in_memory();
        store.create(NewBookmark::bookmark("1", "A", "https://a.example")).unwrap();
        let sub = store.create(NewBookmark::folder("1", "Sub")).unwrap();
        store.create(NewBookmark::bookmark(&sub.id, "B", "https://b.example")).unwrap();
        store.create(NewBookmark::bookmark("1", "C", "https://c.example")).unwrap();
        store.create(NewBookmark::bookmark("2", "D", "https://d.example")).unwrap();

        let found = collect_bookmarks(&store, &["2".to_string(), "1".to_string()]).unwrap();
        let titles: Vec<_> = found.iter().map(|b| b.title.as_str()).collect();

        assert_eq!(titles, ["D", "A", "B", "C"]);
    }

    #[test]
    fn empty_folder_yields_nothing() {
        let store = ChromiumStore::in_memory();
        assert!(collect_bookmarks(&store, &["1".to_string()]).unwrap().is_empty());
    }

    #[test]
    fn unknown_folder_is_an_error() {
        let store = ChromiumStore::in_memory();
        assert!(collect_bookmarks(&store, &["99".to_string()]).is_err());
    }
}
