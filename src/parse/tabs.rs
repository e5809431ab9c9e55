//! Open-tab lists handed over from a browser session export.
//!
//! The file is a JSON array of objects with `title` and `url`, such as the
//! output of `tabs.query`. Entries missing either field are skipped.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::ParsedLink;

#[derive(Debug, Deserialize)]
struct TabEntry {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Parse a tab list from JSON text
pub fn parse_tabs(json: &str) -> Result<Vec<ParsedLink>> {
    let entries: Vec<TabEntry> = serde_json::from_str(json).context("Failed to parse tab list")?;
    Ok(entries
        .into_iter()
        .filter_map(|tab| match (tab.title, tab.url) {
            (Some(title), Some(url)) if !title.is_empty() && !url.is_empty() => {
                Some(ParsedLink { title, url })
            }
            _ => None,
        })
        .collect())
}

/// Load a tab list from disk
pub fn load_tabs(path: &Path) -> Result<Vec<ParsedLink>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tab list: {}", path.display()))?;
    parse_tabs(&content)
}
