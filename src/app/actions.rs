//! User-facing actions on App (menus, folder selection, clipboard, toasts).

use std::path::PathBuf;

use tracing::{error, info, warn};

use super::*;
use crate::bookmarks::{BookmarkStore, StoreError, ROOT_ID};
use crate::operations::{self, OperationOutcome};
use crate::parse::load_bookmarks_file;
use crate::ui::toast::ToastType;

impl App {
    /// Run the home menu entry under the cursor
    pub fn activate_home_item(&mut self, item: HomeItem) {
        match item {
            HomeItem::BookmarkTabs => self.open_folder_selector(PendingAction::AddTabs),
            HomeItem::AddUrls => self.start_add_urls(),
            HomeItem::ImportFile => self.open_import_picker(),
            HomeItem::ExportFolder => self.open_export_picker(),
            HomeItem::RemoveDuplicates => self.open_folder_selector(PendingAction::RemoveDuplicates),
            HomeItem::Quit => self.should_quit = true,
        }
    }

    pub fn start_add_urls(&mut self) {
        self.url_input.reset();
        self.view = View::UrlInput;
    }

    pub fn submit_urls(&mut self, links: Vec<ParsedLink>) {
        self.open_folder_selector(PendingAction::AddUrls(links));
    }

    pub fn open_import_picker(&mut self) {
        let start_dir = dirs::download_dir().or_else(dirs::home_dir);
        match ImportFileModalState::new(start_dir.as_deref()) {
            Ok(state) => self.modal_state = ModalState::ImportFile(Box::new(state)),
            Err(e) => self.toast_error(format!("Cannot browse files: {e}")),
        }
    }

    /// Parse the chosen file; on success move on to folder selection
    pub fn import_file_selected(&mut self, path: PathBuf) {
        match load_bookmarks_file(&path) {
            Ok(tree) => {
                info!(path = %path.display(), "bookmarks file parsed");
                self.close_modal();
                self.open_folder_selector(PendingAction::Import { tree, source: path });
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "bookmarks file rejected");
                if let ModalState::ImportFile(state) = &mut self.modal_state {
                    state.error_message = Some(format!("Error: {e}"));
                } else {
                    self.toast_error(format!("Error: {e}"));
                }
            }
        }
    }

    pub fn open_export_picker(&mut self) {
        let state = ExportFormatModalState::new(self.config.default_export_format);
        self.modal_state = ModalState::ExportFormat(Box::new(state));
    }

    pub fn export_format_selected(&mut self, format: ExportFormat) {
        self.close_modal();
        self.open_folder_selector(PendingAction::Export(format));
    }

    /// Show the folder selector for `action`
    pub fn open_folder_selector(&mut self, action: PendingAction) {
        match self.store_root() {
            Ok(root) => {
                self.folder_tree.reset(root);
                self.pending = Some(action);
                self.view = View::FolderSelector;
            }
            Err(e) => self.toast_error(format!("Error: {e}")),
        }
    }

    /// Run the pending action against the chosen folders
    pub fn confirm_selection(&mut self, folder_ids: &[String]) {
        let Some(action) = self.pending.take() else {
            self.view = View::Home;
            return;
        };

        let outcome = match &action {
            PendingAction::AddTabs => operations::add_links(&mut self.store, folder_ids, &self.tabs),
            PendingAction::AddUrls(links) => operations::add_links(&mut self.store, folder_ids, links),
            PendingAction::Import { tree, .. } => {
                operations::import_bookmarks(&mut self.store, folder_ids, tree)
            }
            PendingAction::Export(format) => operations::export_folders(
                &self.store,
                folder_ids,
                *format,
                self.config.youtube_batch_size,
            ),
            PendingAction::RemoveDuplicates => {
                operations::remove_duplicates_in(&mut self.store, folder_ids)
            }
        };

        // Partial work may have landed even when the operation failed
        self.persist();
        self.finish(action, outcome);
    }

    fn finish(&mut self, action: PendingAction, outcome: OperationOutcome) {
        if !outcome.success {
            self.toast_error(outcome.message);
            self.view = View::Home;
            return;
        }

        if let Some(text) = &outcome.clipboard_text {
            if !self.copy_to_clipboard(text) {
                self.view = View::Home;
                return;
            }
        }
        self.toast_success(outcome.message);

        match (action, outcome.report) {
            (PendingAction::RemoveDuplicates, Some(report)) => {
                self.view = View::DuplicateResults(report);
            }
            (PendingAction::AddUrls(_), _) => {
                self.url_input.reset();
                self.view = View::Home;
            }
            _ => self.view = View::Home,
        }
    }

    pub fn cancel_selection(&mut self) {
        // Going back from a URL list keeps the typed text
        self.view = match self.pending.take() {
            Some(PendingAction::AddUrls(_)) => View::UrlInput,
            _ => View::Home,
        };
    }

    pub fn open_new_folder(&mut self, parent_id: String, parent_title: String) {
        let state = NewFolderModalState::new(parent_id, parent_title);
        self.modal_state = ModalState::NewFolder(Box::new(state));
    }

    /// Create the folder named in the open prompt and show it in the selector
    pub fn confirm_new_folder(&mut self, name: &str) {
        let ModalState::NewFolder(state) = std::mem::take(&mut self.modal_state) else {
            return;
        };

        let outcome = operations::create_folder(&mut self.store, &state.parent_id, name);
        if outcome.success {
            self.persist();
            self.folder_tree.expand(&state.parent_id);
            self.refresh_folder_tree();
            self.toast_success(outcome.message);
        } else {
            self.toast_error(outcome.message);
        }
    }

    pub fn close_modal(&mut self) {
        self.modal_state = ModalState::None;
    }

    pub fn dismiss_results(&mut self) {
        self.view = View::Home;
    }

    /// The store's root folder with all descendants
    fn store_root(&self) -> Result<BookmarkNode, StoreError> {
        self.store
            .get_tree()?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(ROOT_ID.to_string()))
    }

    fn refresh_folder_tree(&mut self) {
        match self.store_root() {
            Ok(root) => self.folder_tree.refresh(root),
            Err(e) => self.toast_error(format!("Error: {e}")),
        }
    }

    /// Write pending store changes, reporting failures as a toast
    fn persist(&mut self) {
        if let Err(e) = self.store.save() {
            error!(error = %e, "failed to save bookmarks");
            self.toast_error(format!("Failed to save bookmarks: {e}"));
        }
    }

    /// Reload the store if another program changed the file
    pub fn check_store_updates(&mut self) {
        let changed = self.watcher.as_ref().is_some_and(StoreWatcher::changed);
        if !changed || self.store.is_dirty() {
            return;
        }
        match self.store.reload() {
            Ok(()) => {
                info!("bookmarks file changed on disk, reloaded");
                if self.view == View::FolderSelector {
                    self.refresh_folder_tree();
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to reload bookmarks");
                self.toast_warning("Bookmarks changed on disk but could not be reloaded");
            }
        }
    }

    /// Copy `text` to the system clipboard; false (with a toast) on failure
    fn copy_to_clipboard(&mut self, text: &str) -> bool {
        if let Ok(mut clipboard) = arboard::Clipboard::new() {
            if clipboard.set_text(text).is_ok() {
                return true;
            }
            self.toast_error("Failed to copy to clipboard");
        } else {
            self.toast_error("Clipboard unavailable");
        }
        false
    }

    pub fn toast_success(&mut self, message: impl Into<String>) {
        self.toast_manager.push(message, ToastType::Success);
    }

    pub fn toast_warning(&mut self, message: impl Into<String>) {
        self.toast_manager.push(message, ToastType::Warning);
    }

    pub fn toast_error(&mut self, message: impl Into<String>) {
        self.toast_manager.push(message, ToastType::Error);
    }
}
