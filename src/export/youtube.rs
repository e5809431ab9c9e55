//! YouTube playlist export: turns watch links into `watch_videos` URLs.

use crate::bookmarks::BookmarkNode;

/// Maximum number of videos YouTube accepts in one `watch_videos` URL
pub const MAX_PLAYLIST_SIZE: usize = 50;

const PLAYLIST_BASE: &str = "https://www.youtube.com/watch_videos?video_ids=";

/// Result of converting a bookmark list into playlist URLs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistExport {
    /// One URL per batch of video IDs
    pub urls: Vec<String>,
    pub video_count: usize,
    /// Links that were not YouTube videos or had no recognizable ID
    pub error_count: usize,
}

impl PlaylistExport {
    pub fn message(&self) -> String {
        let mut message = match self.urls.len() {
            0 => "Error: No valid YouTube video IDs found.".to_string(),
            1 => format!("Created 1 playlist URL with {} videos.", self.video_count),
            n => format!(
                "Created {n} playlist URLs with {} videos total.",
                self.video_count
            ),
        };
        if self.error_count > 0 {
            message.push_str(&format!(" ({} invalid links skipped)", self.error_count));
        }
        message
    }
}

fn is_youtube_link(url: &str) -> bool {
    url.contains("youtube.com/watch") || url.contains("youtu.be/")
}

/// Video ID of a `youtube.com/watch?v=` or `youtu.be/` link
pub fn extract_video_id(url: &str) -> Option<String> {
    if !is_youtube_link(url) {
        return None;
    }
    let parsed = url::Url::parse(url).ok()?;

    if parsed.host_str() == Some("youtu.be") {
        if let Some(id) = parsed.path_segments().and_then(|mut s| s.next()) {
            if !id.is_empty() {
                return Some(id.to_string());
            }
        }
    }

    parsed
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

/// Batch the video IDs in `items` into playlist URLs of at most `batch_size` videos.
///
/// Unusable links are counted, never fatal.
pub fn to_playlists(items: &[BookmarkNode], batch_size: usize) -> PlaylistExport {
    let batch_size = batch_size.clamp(1, MAX_PLAYLIST_SIZE);
    let mut ids = Vec::new();
    let mut error_count = 0;

    for item in items {
        match item.url.as_deref().and_then(extract_video_id) {
            Some(id) => ids.push(id),
            None => error_count += 1,
        }
    }

    PlaylistExport {
        urls: ids
            .chunks(batch_size)
            .map(|chunk| format!("{PLAYLIST_BASE}{}", chunk.join(",")))
            .collect(),
        video_count: ids.len(),
        error_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(urls: &[&str]) -> Vec<BookmarkNode> {
        urls.iter()
            .enumerate()
            .map(|(i, url)| BookmarkNode::bookmark(i.to_string(), "", *url))
            .collect()
    }

    #[test]
    fn extracts_ids_from_both_link_styles() {
        assert_eq!(extract_video_id("https://youtu.be/abc").as_deref(), Some("abc"));
        assert_eq!(extract_video_id("https://youtu.be/abc?t=10").as_deref(), Some("abc"));
        assert_eq!(
            extract_video_id("https://music.youtube.com/watch?list=x&v=def").as_deref(),
            Some("def")
        );
        assert_eq!(extract_video_id("https://www.youtube.com/watch?list=x"), None);
        assert_eq!(extract_video_id("https://vimeo.com/123"), None);
    }

    #[test]
    fn mixed_list_yields_one_playlist_and_counts_skips() {
        let export = to_playlists(
            &links(&[
                "https://youtu.be/abc",
                "https://www.youtube.com/watch?v=def",
                "https://notyoutube.com/x",
            ]),
            MAX_PLAYLIST_SIZE,
        );

        assert_eq!(
            export.urls,
            ["https://www.youtube.com/watch_videos?video_ids=abc,def"]
        );
        assert_eq!(export.error_count, 1);
        assert_eq!(
            export.message(),
            "Created 1 playlist URL with 2 videos. (1 invalid links skipped)"
        );
    }

    #[test]
    fn batches_are_capped_at_fifty() {
        let urls: Vec<String> = (0..120).map(|i| format!("https://youtu.be/v{i}")).collect();
        let refs: Vec<&str> = urls.iter().map(String::as_str).collect();
        let export = to_playlists(&links(&refs), 500);

        assert_eq!(export.urls.len(), 3);
        assert_eq!(export.urls[2].matches(',').count(), 19);
        assert_eq!(export.message(), "Created 3 playlist URLs with 120 videos total.");
    }

    #[test]
    fn no_ids_is_reported_in_the_message() {
        let export = to_playlists(&links(&["https://example.com"]), MAX_PLAYLIST_SIZE);
        assert!(export.urls.is_empty());
        assert_eq!(
            export.message(),
            "Error: No valid YouTube video IDs found. (1 invalid links skipped)"
        );
    }
}
