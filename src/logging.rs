//! File logging. The terminal belongs to the UI, so log lines go to
//! `<data_local_dir>/tabmarks/tabmarks.log`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::APP_DIR;

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "TABMARKS_LOG";

/// Path of the log file
pub fn log_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir().context("Could not find local data directory")?;
    Ok(data_dir.join(APP_DIR).join("tabmarks.log"))
}

/// Install the global subscriber, returning the log file path
pub fn init() -> Result<PathBuf> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(path)
}
