//! Editable text buffer shared by the URL input view and the new folder
//! prompt. The cursor is a byte offset that always sits on a char boundary.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

#[derive(Debug, Clone, Default)]
pub struct TextInput {
    text: String,
    cursor: usize,
    multiline: bool,
}

impl TextInput {
    pub fn single_line() -> Self {
        Self::default()
    }

    pub fn multi_line() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert pasted text. Line breaks are normalized to `\n`, or to spaces
    /// in a single-line input.
    pub fn insert_str(&mut self, s: &str) {
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        let normalized = if self.multiline {
            normalized
        } else {
            normalized.replace('\n', " ")
        };
        self.text.insert_str(self.cursor, &normalized);
        self.cursor += normalized.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor].char_indices().next_back().map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    fn line_start(&self) -> usize {
        self.text[..self.cursor].rfind('\n').map_or(0, |i| i + 1)
    }

    fn line_end(&self) -> usize {
        self.text[self.cursor..]
            .find('\n')
            .map_or(self.text.len(), |i| self.cursor + i)
    }

    /// Apply an editing key. Returns false if the key is not an editing key.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
            }
            KeyCode::Enter if self.multiline => self.insert_char('\n'),
            KeyCode::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.text.drain(prev..self.cursor);
                    self.cursor = prev;
                }
            }
            KeyCode::Delete => {
                if let Some(next) = self.next_boundary() {
                    self.text.drain(self.cursor..next);
                }
            }
            KeyCode::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
            }
            KeyCode::Right => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
            }
            KeyCode::Home => self.cursor = self.line_start(),
            KeyCode::End => self.cursor = self.line_end(),
            KeyCode::Up if self.multiline => self.move_vertical(false),
            KeyCode::Down if self.multiline => self.move_vertical(true),
            _ => return false,
        }
        true
    }

    /// Move to the same column on the previous or next line
    fn move_vertical(&mut self, down: bool) {
        let start = self.line_start();
        let column = self.text[start..self.cursor].chars().count();

        let target_start = if down {
            match self.text[self.cursor..].find('\n') {
                Some(i) => self.cursor + i + 1,
                None => return,
            }
        } else {
            if start == 0 {
                return;
            }
            self.text[..start - 1].rfind('\n').map_or(0, |i| i + 1)
        };

        let target_line = self.text[target_start..].split('\n').next().unwrap_or_default();
        let offset = target_line
            .char_indices()
            .nth(column)
            .map_or(target_line.len(), |(i, _)| i);
        self.cursor = target_start + offset;
    }

    /// Render as lines with a block cursor
    pub fn lines(&self) -> Vec<Line<'_>> {
        let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
        let mut lines = Vec::new();
        let mut offset = 0;

        for raw in self.text.split('\n') {
            let end = offset + raw.len();
            let line = if (offset..=end).contains(&self.cursor) {
                let at = self.cursor - offset;
                let (before, rest) = raw.split_at(at);
                let mut chars = rest.chars();
                let (under, after) = match chars.next() {
                    Some(c) => (c.to_string(), chars.as_str()),
                    None => (" ".to_string(), ""),
                };
                Line::from(vec![
                    Span::raw(before),
                    Span::styled(under, cursor_style),
                    Span::raw(after),
                ])
            } else {
                Line::from(raw)
            };
            lines.push(line);
            offset = end + 1;
        }
        lines
    }

    /// Zero-based line of the cursor
    pub fn cursor_line(&self) -> usize {
        self.text[..self.cursor].matches('\n').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn edits_multibyte_text() {
        let mut input = TextInput::single_line();
        input.insert_str("héllo");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.text(), "hllo");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn single_line_paste_flattens_newlines() {
        let mut input = TextInput::single_line();
        input.insert_str("a\r\nb");
        assert_eq!(input.text(), "a b");
    }

    #[test]
    fn enter_only_breaks_lines_when_multiline() {
        let mut single = TextInput::single_line();
        assert!(!single.handle_key(key(KeyCode::Enter)));

        let mut multi = TextInput::multi_line();
        multi.insert_str("a");
        assert!(multi.handle_key(key(KeyCode::Enter)));
        assert_eq!(multi.cursor_line(), 1);
    }

    #[test]
    fn vertical_movement_keeps_column() {
        let mut input = TextInput::multi_line();
        input.insert_str("abcd\nx\nlonger");
        input.handle_key(key(KeyCode::Up));
        assert_eq!(input.cursor(), 6);
        input.handle_key(key(KeyCode::Up));
        assert_eq!(input.cursor(), 1);
        input.handle_key(key(KeyCode::End));
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn cursor_renders_on_its_line() {
        let mut input = TextInput::multi_line();
        input.insert_str("ab\ncd");
        let lines = input.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans[1].content, " ");
    }
}
