//! Application state and core data types for tabmarks.

mod actions;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::bookmarks::{BookmarkNode, ChromiumStore};
use crate::config::Config;
use crate::export::ExportFormat;
use crate::operations::DuplicateReport;
use crate::parse::ParsedLink;
use crate::ui::folder_tree::FolderTreeState;
use crate::ui::home::{HomeItem, HomeState};
use crate::ui::modal::{ExportFormatModalState, ImportFileModalState, NewFolderModalState};
use crate::ui::toast::ToastManager;
use crate::ui::url_input::UrlInputState;
use crate::watcher::StoreWatcher;

/// Which screen fills the main area
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    UrlInput,
    FolderSelector,
    DuplicateResults(DuplicateReport),
}

/// Modal dialog state
#[derive(Default)]
pub enum ModalState {
    /// No modal is open
    #[default]
    None,
    ImportFile(Box<ImportFileModalState>),
    ExportFormat(Box<ExportFormatModalState>),
    NewFolder(Box<NewFolderModalState>),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::None)
    }
}

/// What runs once folders are picked in the selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    AddTabs,
    AddUrls(Vec<ParsedLink>),
    Import { tree: Vec<BookmarkNode>, source: PathBuf },
    Export(ExportFormat),
    RemoveDuplicates,
}

impl PendingAction {
    /// Title of the folder selector while this action waits
    pub fn selector_title(&self) -> String {
        match self {
            PendingAction::AddTabs => "Bookmark tabs into…".to_string(),
            PendingAction::AddUrls(links) => format!("Add {} links to…", links.len()),
            PendingAction::Import { source, .. } => {
                let name = source
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "file".to_string());
                format!("Import {name} into…")
            }
            PendingAction::Export(format) => format!("Export as {} from…", format.label()),
            PendingAction::RemoveDuplicates => "Remove duplicates in…".to_string(),
        }
    }
}

/// Application state
pub struct App {
    pub config: Config,
    pub store: ChromiumStore,
    watcher: Option<StoreWatcher>,
    pub view: View,
    pub modal_state: ModalState,
    pub pending: Option<PendingAction>,
    /// Tabs handed over with `--tabs`
    pub tabs: Vec<ParsedLink>,
    pub home_state: HomeState,
    pub url_input: UrlInputState,
    pub folder_tree: FolderTreeState,
    pub toast_manager: ToastManager,
    pub should_quit: bool,
}

impl App {
    /// Open the store at `store_path` and watch it for outside changes
    pub fn new(config: Config, store_path: &Path, tabs: Vec<ParsedLink>) -> Result<Self> {
        let store = ChromiumStore::open(store_path)
            .with_context(|| format!("Failed to open bookmarks file: {}", store_path.display()))?;

        let watcher = match StoreWatcher::new(store_path) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                warn!(error = %e, "not watching bookmarks file");
                None
            }
        };
        info!(path = %store_path.display(), tabs = tabs.len(), "opened bookmarks");

        Ok(Self::with_store(config, store, watcher, tabs))
    }

    /// Build an app around an already opened store
    pub fn with_store(
        config: Config,
        store: ChromiumStore,
        watcher: Option<StoreWatcher>,
        tabs: Vec<ParsedLink>,
    ) -> Self {
        let toast_manager = ToastManager::new(Duration::from_secs(config.status_timeout_secs));
        Self {
            config,
            store,
            watcher,
            view: View::Home,
            modal_state: ModalState::None,
            pending: None,
            tabs,
            home_state: HomeState::new(),
            url_input: UrlInputState::new(),
            folder_tree: FolderTreeState::new(),
            toast_manager,
            should_quit: false,
        }
    }

    pub fn home_items(&self) -> Vec<HomeItem> {
        HomeItem::menu(!self.tabs.is_empty())
    }

    /// Short description of the backing file for the home screen
    pub fn store_label(&self) -> String {
        match self.store.path() {
            Some(path) if self.store.is_dirty() => format!("{} (unsaved)", path.display()),
            Some(path) => path.display().to_string(),
            None => "in memory".to_string(),
        }
    }
}
