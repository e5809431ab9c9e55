//! Prompt for the name of a folder created from the folder selector.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::ui::text_input::TextInput;

/// Result of a key press in the new folder prompt
#[derive(Debug, PartialEq, Eq)]
pub enum NewFolderKeyResult {
    Continue,
    Cancel,
    Confirm(String),
}

pub struct NewFolderModalState {
    pub name_input: TextInput,
    pub error_message: Option<String>,
    /// Folder the new folder is created in
    pub parent_id: String,
    pub parent_title: String,
}

impl NewFolderModalState {
    pub fn new(parent_id: String, parent_title: String) -> Self {
        Self {
            name_input: TextInput::single_line(),
            error_message: None,
            parent_id,
            parent_title,
        }
    }

    pub fn paste(&mut self, text: &str) {
        self.name_input.insert_str(text);
        self.error_message = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> NewFolderKeyResult {
        match key.code {
            KeyCode::Esc => NewFolderKeyResult::Cancel,
            KeyCode::Enter => {
                let name = self.name_input.text().trim();
                if name.is_empty() {
                    self.error_message = Some("Folder name cannot be empty".to_string());
                    return NewFolderKeyResult::Continue;
                }
                NewFolderKeyResult::Confirm(name.to_string())
            }
            _ => {
                if self.name_input.handle_key(key) {
                    self.error_message = None;
                }
                NewFolderKeyResult::Continue
            }
        }
    }
}

/// Widget for rendering the new folder prompt
pub struct NewFolderModal<'a> {
    state: &'a NewFolderModalState,
}

impl<'a> NewFolderModal<'a> {
    pub fn new(state: &'a NewFolderModalState) -> Self {
        Self { state }
    }

    /// Centered, ~40% width, 9 lines
    pub fn calculate_area(total: Rect) -> Rect {
        let width = (total.width * 40 / 100)
            .max(36)
            .min(total.width.saturating_sub(4));
        let height = 9u16.min(total.height.saturating_sub(4));

        let x = (total.width.saturating_sub(width)) / 2;
        let y = (total.height.saturating_sub(height)) / 2;

        Rect::new(x, y, width, height)
    }
}

impl Widget for NewFolderModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 6 {
            return;
        }

        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" New Folder in {} ", self.state.parent_title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(3), // Input field
            Constraint::Length(1), // Error message
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Help bar
        ])
        .split(inner);

        let input_block = Block::default()
            .title(" Name ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let input_inner = input_block.inner(chunks[0]);
        input_block.render(chunks[0], buf);

        // Scroll so the cursor stays visible
        let before_cursor = self.state.name_input.text()[..self.state.name_input.cursor()]
            .chars()
            .count();
        let scroll = before_cursor.saturating_sub(input_inner.width.saturating_sub(1) as usize);
        Paragraph::new(self.state.name_input.lines())
            .scroll((0, scroll as u16))
            .render(input_inner, buf);

        if let Some(ref error) = self.state.error_message {
            let error_line = Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red)));
            Paragraph::new(error_line).render(chunks[1], buf);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("create "),
            Span::styled(" Esc ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("cancel"),
        ]))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
        help.render(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(state: &mut NewFolderModalState, code: KeyCode) -> NewFolderKeyResult {
        state.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn blank_name_shows_error() {
        let mut state = NewFolderModalState::new("1".into(), "Bookmarks bar".into());
        press(&mut state, KeyCode::Char(' '));
        assert_eq!(press(&mut state, KeyCode::Enter), NewFolderKeyResult::Continue);
        assert!(state.error_message.is_some());
    }

    #[test]
    fn confirms_trimmed_name() {
        let mut state = NewFolderModalState::new("1".into(), "Bookmarks bar".into());
        state.paste(" Reading list ");
        assert_eq!(
            press(&mut state, KeyCode::Enter),
            NewFolderKeyResult::Confirm("Reading list".to_string())
        );
    }
}
