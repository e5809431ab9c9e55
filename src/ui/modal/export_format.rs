//! Export format picker.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::export::ExportFormat;

#[derive(Debug, PartialEq, Eq)]
pub enum ExportFormatKeyResult {
    Continue,
    Cancel,
    Selected(ExportFormat),
}

pub struct ExportFormatModalState {
    pub list_state: ListState,
}

impl ExportFormatModalState {
    /// Open with `preselected` highlighted
    pub fn new(preselected: ExportFormat) -> Self {
        let index = ExportFormat::ALL
            .iter()
            .position(|f| *f == preselected)
            .unwrap_or(0);
        let mut list_state = ListState::default();
        list_state.select(Some(index));
        Self { list_state }
    }

    fn current(&self) -> ExportFormat {
        let index = self.list_state.selected().unwrap_or(0);
        ExportFormat::ALL[index.min(ExportFormat::ALL.len() - 1)]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ExportFormatKeyResult {
        let index = self.list_state.selected().unwrap_or(0);
        match key.code {
            KeyCode::Esc => return ExportFormatKeyResult::Cancel,
            KeyCode::Enter => return ExportFormatKeyResult::Selected(self.current()),
            KeyCode::Char('j') | KeyCode::Down => {
                self.list_state
                    .select(Some((index + 1).min(ExportFormat::ALL.len() - 1)));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.list_state.select(Some(index.saturating_sub(1)));
            }
            // Number keys pick directly
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                return ExportFormatKeyResult::Selected(ExportFormat::ALL[index]);
            }
            _ => {}
        }
        ExportFormatKeyResult::Continue
    }
}

pub struct ExportFormatModal<'a> {
    state: &'a mut ExportFormatModalState,
}

impl<'a> ExportFormatModal<'a> {
    pub fn new(state: &'a mut ExportFormatModalState) -> Self {
        Self { state }
    }

    pub fn calculate_area(total: Rect) -> Rect {
        let width = 40u16.min(total.width.saturating_sub(4));
        let height = (ExportFormat::ALL.len() as u16 + 4).min(total.height.saturating_sub(2));

        let x = (total.width.saturating_sub(width)) / 2;
        let y = (total.height.saturating_sub(height)) / 2;

        Rect::new(x, y, width, height)
    }
}

impl Widget for ExportFormatModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(" Export Format ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        let items: Vec<ListItem> = ExportFormat::ALL
            .iter()
            .enumerate()
            .map(|(i, format)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::raw(format.label()),
                ]))
            })
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        StatefulWidget::render(list, chunks[0], buf, &mut self.state.list_state);

        Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Cyan)),
            Span::raw("choose "),
            Span::styled(" Esc ", Style::default().fg(Color::Cyan)),
            Span::raw("cancel"),
        ]))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
    }
}
