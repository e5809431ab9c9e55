//! Clipboard text encodings for a flat list of bookmarks.

use serde::{Deserialize, Serialize};

use crate::bookmarks::BookmarkNode;

pub mod youtube;

pub use youtube::MAX_PLAYLIST_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Urls,
    Tsv,
    Csv,
    Markdown,
    Youtube,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Urls,
        ExportFormat::Tsv,
        ExportFormat::Csv,
        ExportFormat::Markdown,
        ExportFormat::Youtube,
    ];

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Urls => "Plain URLs",
            ExportFormat::Tsv => "Title<TAB>URL",
            ExportFormat::Csv => "CSV (\"title\",\"url\")",
            ExportFormat::Markdown => "Markdown links",
            ExportFormat::Youtube => "YouTube playlist",
        }
    }
}

/// Rendered export, ready for the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutput {
    pub text: String,
    pub message: String,
    /// Items that could not be rendered (YouTube export only)
    pub error_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("Error: No links found in folder")]
    NoLinks,
    #[error("{message}")]
    NoVideoIds { message: String, error_count: usize },
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Render `items` in the requested format
pub fn format(items: &[BookmarkNode], kind: ExportFormat) -> Result<ExportOutput, ExportError> {
    format_batched(items, kind, MAX_PLAYLIST_SIZE)
}

/// Like [`format`], with a custom YouTube playlist batch size (capped at 50)
pub fn format_batched(
    items: &[BookmarkNode],
    kind: ExportFormat,
    playlist_size: usize,
) -> Result<ExportOutput, ExportError> {
    if items.is_empty() {
        return Err(ExportError::NoLinks);
    }

    let message = if items.len() == 1 {
        "Link copied to clipboard!"
    } else {
        "Links copied to clipboard!"
    };
    let url = |item: &BookmarkNode| item.url.clone().unwrap_or_default();

    let lines: Vec<String> = match kind {
        ExportFormat::Urls => items.iter().map(url).collect(),
        ExportFormat::Tsv => items
            .iter()
            .map(|item| format!("{}\t{}", item.title, url(item)))
            .collect(),
        ExportFormat::Csv => items
            .iter()
            .map(|item| format!("{},{}", csv_field(&item.title), csv_field(&url(item))))
            .collect(),
        ExportFormat::Markdown => items
            .iter()
            .map(|item| format!("[{}]({})", item.title, url(item)))
            .collect(),
        ExportFormat::Youtube => {
            let export = youtube::to_playlists(items, playlist_size);
            if export.urls.is_empty() {
                return Err(ExportError::NoVideoIds {
                    message: export.message(),
                    error_count: export.error_count,
                });
            }
            return Ok(ExportOutput {
                text: export.urls.join("\n"),
                message: export.message(),
                error_count: export.error_count,
            });
        }
    };

    Ok(ExportOutput {
        text: lines.join("\n"),
        message: message.to_string(),
        error_count: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<BookmarkNode> {
        vec![
            BookmarkNode::bookmark("1", "Rust", "https://www.rust-lang.org"),
            BookmarkNode::bookmark("2", "Docs", "https://docs.rs"),
        ]
    }

    #[test]
    fn plain_formats() {
        let items = sample();
        assert_eq!(
            format(&items, ExportFormat::Urls).unwrap().text,
            "https://www.rust-lang.org\nhttps://docs.rs"
        );
        assert_eq!(
            format(&items, ExportFormat::Tsv).unwrap().text,
            "Rust\thttps://www.rust-lang.org\nDocs\thttps://docs.rs"
        );
        assert_eq!(
            format(&items, ExportFormat::Markdown).unwrap().text,
            "[Rust](https://www.rust-lang.org)\n[Docs](https://docs.rs)"
        );
    }

    #[test]
    fn csv_doubles_inner_quotes() {
        let items = vec![BookmarkNode::bookmark("1", "He said \"hi\"", "http://x")];
        let output = format(&items, ExportFormat::Csv).unwrap();
        assert_eq!(output.text, r#""He said ""hi""","http://x""#);
        assert_eq!(output.message, "Link copied to clipboard!");
    }

    #[test]
    fn empty_selection_is_an_error_for_every_format() {
        for kind in ExportFormat::ALL {
            assert_eq!(format(&[], kind), Err(ExportError::NoLinks));
        }
    }

    #[test]
    fn youtube_without_videos_is_an_error_state() {
        let err = format(&sample(), ExportFormat::Youtube).unwrap_err();
        assert_eq!(
            err,
            ExportError::NoVideoIds {
                message: "Error: No valid YouTube video IDs found. (2 invalid links skipped)".into(),
                error_count: 2,
            }
        );
    }

    #[test]
    fn youtube_success_uses_playlist_message() {
        let items = vec![
            BookmarkNode::bookmark("1", "", "https://youtu.be/abc"),
            BookmarkNode::bookmark("2", "", "https://www.youtube.com/watch?v=def"),
        ];
        let output = format(&items, ExportFormat::Youtube).unwrap();
        assert!(output.text.ends_with("video_ids=abc,def"));
        assert_eq!(output.message, "Created 1 playlist URL with 2 videos.");
        assert_eq!(output.error_count, 0);
    }

    #[test]
    fn format_names_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&ExportFormat::Markdown).unwrap(), "\"markdown\"");
    }
}
