//! URL list entry view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::parse::{parse_url_list, ParsedLink};
use crate::ui::text_input::TextInput;

/// Result of a key press in the URL input view
#[derive(Debug, PartialEq, Eq)]
pub enum UrlInputKeyResult {
    Continue,
    Cancel,
    Submit(Vec<ParsedLink>),
}

pub struct UrlInputState {
    pub input: TextInput,
    pub error_message: Option<String>,
}

impl Default for UrlInputState {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlInputState {
    pub fn new() -> Self {
        Self {
            input: TextInput::multi_line(),
            error_message: None,
        }
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.error_message = None;
    }

    pub fn paste(&mut self, text: &str) {
        self.input.insert_str(text);
        self.error_message = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> UrlInputKeyResult {
        match key.code {
            KeyCode::Esc => UrlInputKeyResult::Cancel,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => self.submit(),
            _ => {
                if self.input.handle_key(key) {
                    self.error_message = None;
                }
                UrlInputKeyResult::Continue
            }
        }
    }

    fn submit(&mut self) -> UrlInputKeyResult {
        if self.input.is_empty() {
            self.error_message = Some("Enter at least one URL".to_string());
            return UrlInputKeyResult::Continue;
        }
        match parse_url_list(self.input.text()) {
            Ok(links) => UrlInputKeyResult::Submit(links),
            Err(e) => {
                self.error_message = Some(capitalize(&e.to_string()));
                UrlInputKeyResult::Continue
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct UrlInput<'a> {
    state: &'a UrlInputState,
}

impl<'a> UrlInput<'a> {
    pub fn new(state: &'a UrlInputState) -> Self {
        Self { state }
    }
}

impl Widget for UrlInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Add URLs ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(2), // Instructions
            Constraint::Min(3),    // Editor
            Constraint::Length(1), // Error message
        ])
        .split(inner);

        Paragraph::new(vec![
            Line::from("One link per line: URL, URL | Title, or [Title](URL)"),
            Line::from(Span::styled(
                "Paste with your terminal; blank lines are ignored.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .render(chunks[0], buf);

        let editor_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let editor_inner = editor_block.inner(chunks[1]);
        editor_block.render(chunks[1], buf);

        // Keep the cursor line on screen
        let height = editor_inner.height as usize;
        let scroll = self.state.input.cursor_line().saturating_sub(height.saturating_sub(1));
        Paragraph::new(self.state.input.lines())
            .scroll((scroll as u16, 0))
            .render(editor_inner, buf);

        if let Some(ref error) = self.state.error_message {
            Paragraph::new(Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))))
                .wrap(Wrap { trim: true })
                .render(chunks[2], buf);
        }
    }
}
