//! Line-oriented URL list parsing.
//!
//! Each non-blank line is one of:
//! - `[Title](URL)`
//! - `URL | Title`
//! - `URL`

use std::sync::LazyLock;

use regex::Regex;

use super::ParsedLink;

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("markdown link pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: no URL found")]
    MissingUrl { line: usize },
    #[error("line {line}: invalid URL `{url}` ({reason})")]
    InvalidUrl {
        line: usize,
        url: String,
        reason: String,
    },
}

impl ParseError {
    /// 1-based line number of the offending line
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingUrl { line } | ParseError::InvalidUrl { line, .. } => *line,
        }
    }
}

/// Parse one line. `line_no` is only used for error reporting.
pub fn parse_line(line_no: usize, line: &str) -> Result<ParsedLink, ParseError> {
    let (url, title) = match MARKDOWN_LINK.captures(line) {
        Some(caps) => {
            let group = |i| caps.get(i).map_or("", |m| m.as_str().trim());
            (group(2), group(1))
        }
        None => {
            let mut parts = line.split('|');
            let url = parts.next().unwrap_or_default().trim();
            let title = parts.next().unwrap_or_default().trim();
            (url, title)
        }
    };

    if url.is_empty() {
        return Err(ParseError::MissingUrl { line: line_no });
    }
    let parsed = url::Url::parse(url).map_err(|e| ParseError::InvalidUrl {
        line: line_no,
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let title = if title.is_empty() {
        parsed.host_str().unwrap_or_default().to_string()
    } else {
        title.to_string()
    };

    Ok(ParsedLink {
        title,
        url: url.to_string(),
    })
}

/// Parse a whole list. Blank lines are skipped; any bad line fails the batch.
pub fn parse_url_list(text: &str) -> Result<Vec<ParsedLink>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_line(idx + 1, line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_url_takes_hostname_as_title() {
        assert_eq!(
            parse_line(1, "https://example.com").unwrap(),
            ParsedLink {
                title: "example.com".into(),
                url: "https://example.com".into(),
            }
        );
    }

    #[test]
    fn pipe_separated_title() {
        let link = parse_line(1, "  https://docs.rs/regex | Regex docs ").unwrap();
        assert_eq!(link.url, "https://docs.rs/regex");
        assert_eq!(link.title, "Regex docs");
    }

    #[test]
    fn markdown_link_anywhere_in_line() {
        let link = parse_line(1, "- see [The Book](https://doc.rust-lang.org/book/)").unwrap();
        assert_eq!(link.title, "The Book");
        assert_eq!(link.url, "https://doc.rust-lang.org/book/");
    }

    #[test]
    fn empty_markdown_title_falls_back_to_hostname() {
        let link = parse_line(1, "[](https://crates.io/crates/url)").unwrap();
        assert_eq!(link.title, "crates.io");
    }

    #[test]
    fn invalid_line_reports_its_number() {
        let err = parse_url_list("https://a.example\n\nnot a url\nhttps://b.example").unwrap_err();
        assert_eq!(err.line(), 3);
        assert!(matches!(err, ParseError::InvalidUrl { .. }));
    }

    #[test]
    fn missing_url_before_pipe() {
        assert_eq!(
            parse_line(4, " | Title only"),
            Err(ParseError::MissingUrl { line: 4 })
        );
    }

    #[test]
    fn list_keeps_order_and_skips_blank_lines() {
        let links = parse_url_list("https://a.example | A\n   \n[B](https://b.example)\n").unwrap();
        let titles: Vec<_> = links.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["A", "B"]);
    }
}
