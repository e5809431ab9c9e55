//! Netscape bookmark file (`bookmarks.html`) parsing.
//!
//! Browsers export bookmarks as nested `<DL>` lists where an `<H3>` heading
//! names the `<DL>` that follows it and each `<A HREF>` is a bookmark. Only
//! those three tags are significant; `<DT>` and `<p>` wrappers are ignored.
//! The result is a single synthetic "Imported Bookmarks" folder holding the
//! top-level list, with `imported-N` IDs that never collide with store IDs.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::bookmarks::BookmarkNode;

/// Title of the synthetic folder wrapping an imported file
pub const IMPORT_ROOT_TITLE: &str = "Imported Bookmarks";
/// Title for a `<DL>` with no preceding `<H3>`
const UNTITLED_LIST: &str = "Other Favorites";
/// Title for an `<H3>` with no text
const UNNAMED_FOLDER: &str = "Unnamed Folder";

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)(dl|h3|a)\b([^>]*)>").expect("tag pattern is valid"));
static H3_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</h3\s*>").expect("h3 end pattern is valid"));
static A_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</a\s*>").expect("anchor end pattern is valid"));
static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
        .expect("href pattern is valid")
});
static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag strip pattern is valid"));
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("entity pattern is valid")
});

#[derive(Debug, thiserror::Error)]
pub enum ImportFileError {
    #[error("no bookmark list (<DL>) found in file")]
    NoBookmarkList,
    #[error("failed to read bookmarks file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    ListStart,
    ListEnd,
    Heading(String),
    Link { href: String, text: String },
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let decoded = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => name
                    .strip_prefix("#x")
                    .or_else(|| name.strip_prefix("#X"))
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| name.strip_prefix('#').map(str::parse))
                    .and_then(Result::ok)
                    .and_then(char::from_u32),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

/// Text between `start` and the closing tag, plus the offset just past it
fn element_text(html: &str, start: usize, end_tag: &Regex) -> (String, usize) {
    let (raw, next) = match end_tag.find_at(html, start) {
        Some(m) => (&html[start..m.start()], m.end()),
        None => (&html[start..], html.len()),
    };
    let text = decode_entities(&ANY_TAG.replace_all(raw, ""));
    (text.trim().to_string(), next)
}

fn href(attributes: &str) -> String {
    HREF.captures(attributes)
        .and_then(|caps| caps.get(1).or(caps.get(2)).or(caps.get(3)))
        .map(|m| decode_entities(m.as_str()))
        .unwrap_or_default()
}

fn tokenize(html: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(caps) = TAG.captures_at(html, pos) {
        let Some(whole) = caps.get(0) else { break };
        pos = whole.end();
        let closing = !caps[1].is_empty();

        match (closing, caps[2].to_ascii_lowercase().as_str()) {
            (false, "dl") => tokens.push(Token::ListStart),
            (true, "dl") => tokens.push(Token::ListEnd),
            (false, "h3") => {
                let (text, next) = element_text(html, pos, &H3_END);
                pos = next;
                tokens.push(Token::Heading(text));
            }
            (false, "a") => {
                let href = href(&caps[3]);
                let (text, next) = element_text(html, pos, &A_END);
                pos = next;
                tokens.push(Token::Link { href, text });
            }
            _ => {}
        }
    }
    tokens
}

struct TreeBuilder<I: Iterator<Item = Token>> {
    tokens: I,
    next_id: usize,
}

impl<I: Iterator<Item = Token>> TreeBuilder<I> {
    fn generate_id(&mut self) -> String {
        self.next_id += 1;
        format!("imported-{}", self.next_id)
    }

    /// Consume tokens up to the matching `</DL>`
    fn list(&mut self, parent_id: &str) -> Vec<BookmarkNode> {
        let mut nodes = Vec::new();
        let mut heading: Option<String> = None;

        while let Some(token) = self.tokens.next() {
            match token {
                Token::ListEnd => break,
                Token::Heading(text) => {
                    heading = Some(if text.is_empty() {
                        UNNAMED_FOLDER.to_string()
                    } else {
                        text
                    });
                }
                Token::ListStart => {
                    let id = self.generate_id();
                    let title = heading.take().unwrap_or_else(|| UNTITLED_LIST.to_string());
                    let children = self.list(&id);
                    let mut folder = BookmarkNode::folder(id, title, children);
                    folder.parent_id = Some(parent_id.to_string());
                    nodes.push(folder);
                }
                Token::Link { href, text } => {
                    let mut bookmark = BookmarkNode::bookmark(self.generate_id(), text, href);
                    bookmark.parent_id = Some(parent_id.to_string());
                    nodes.push(bookmark);
                }
            }
        }
        nodes
    }
}

/// Parse a Netscape bookmark document into a single-root import tree.
///
/// Bookmark titles may be empty; the importer falls back to the hostname.
pub fn parse_bookmarks_html(html: &str) -> Result<Vec<BookmarkNode>, ImportFileError> {
    let mut tokens = tokenize(html).into_iter();
    if !tokens.any(|t| t == Token::ListStart) {
        return Err(ImportFileError::NoBookmarkList);
    }

    let mut builder = TreeBuilder { tokens, next_id: 0 };
    let root_id = builder.generate_id();
    let children = builder.list(&root_id);
    debug!(top_level = children.len(), "parsed bookmarks file");

    Ok(vec![BookmarkNode::folder(root_id, IMPORT_ROOT_TITLE, children)])
}

/// Read and parse a bookmarks file from disk
pub fn load_bookmarks_file(path: &Path) -> Result<Vec<BookmarkNode>, ImportFileError> {
    let html = std::fs::read_to_string(path)?;
    parse_bookmarks_html(&html)
}
