use anyhow::{Context, Result};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

/// Watches the bookmarks file for changes made by other programs (the browser).
pub struct StoreWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<PathBuf>,
}

impl StoreWatcher {
    /// Watch `store_path`. The parent directory is watched because browsers
    /// replace the file on save rather than writing it in place.
    pub fn new(store_path: &Path) -> Result<Self> {
        let dir = store_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();
        let file_name: OsString = store_path
            .file_name()
            .context("Bookmarks path has no file name")?
            .to_os_string();

        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if event.kind.is_modify() || event.kind.is_create() {
                        for path in event.paths {
                            if path.file_name() == Some(file_name.as_os_str()) {
                                let _ = tx.send(path);
                            }
                        }
                    }
                }
            },
            Config::default().with_poll_interval(Duration::from_millis(500)),
        )?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    /// Drain pending events; true if the file changed since the last call
    pub fn changed(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}
