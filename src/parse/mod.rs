//! Input sources: URL lists, Netscape bookmark files and tab lists.

use serde::{Deserialize, Serialize};

pub mod netscape;
pub mod tabs;
pub mod url_list;

pub use netscape::{load_bookmarks_file, parse_bookmarks_html, ImportFileError};
pub use tabs::load_tabs;
pub use url_list::{parse_line, parse_url_list, ParseError};

/// A link to bookmark, from a URL list or an open tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLink {
    pub title: String,
    pub url: String,
}
