//! File picker for Netscape bookmark exports (`bookmarks.html`).

use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use ratatui_explorer::FileExplorer;

#[derive(Debug, PartialEq, Eq)]
pub enum ImportFileKeyResult {
    Continue,
    Cancel,
    Selected(PathBuf),
}

pub struct ImportFileModalState {
    pub file_explorer: FileExplorer,
    /// Parse or read failure of the last chosen file
    pub error_message: Option<String>,
}

/// Whether `path` looks like an HTML bookmark export
pub fn is_bookmark_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

impl ImportFileModalState {
    /// Open the picker in `start_dir`, or the working directory if that fails
    pub fn new(start_dir: Option<&Path>) -> io::Result<Self> {
        let mut file_explorer = FileExplorer::new()?;
        if let Some(dir) = start_dir {
            // Keep the working directory if the start dir is unreadable
            let _ = file_explorer.set_cwd(dir);
        }
        Ok(Self {
            file_explorer,
            error_message: None,
        })
    }

    fn forward(&mut self, code: KeyCode) {
        let _ = self
            .file_explorer
            .handle(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ImportFileKeyResult {
        match key.code {
            KeyCode::Esc => return ImportFileKeyResult::Cancel,
            KeyCode::Enter => {
                let current = self.file_explorer.current();
                let path = current.path().to_path_buf();
                if current.is_dir() {
                    self.forward(KeyCode::Right);
                } else if is_bookmark_file(&path) {
                    return ImportFileKeyResult::Selected(path);
                } else {
                    self.error_message = Some("Choose an .html bookmarks export".to_string());
                }
            }
            KeyCode::Char('h') | KeyCode::Left => self.forward(KeyCode::Left),
            KeyCode::Char('j') | KeyCode::Down => self.forward(KeyCode::Down),
            KeyCode::Char('k') | KeyCode::Up => self.forward(KeyCode::Up),
            KeyCode::Char('l') | KeyCode::Right => self.forward(KeyCode::Right),
            KeyCode::Char('g') => self.forward(KeyCode::Home),
            KeyCode::Char('G') => self.forward(KeyCode::End),
            _ => return ImportFileKeyResult::Continue,
        }
        if key.code != KeyCode::Enter {
            self.error_message = None;
        }
        ImportFileKeyResult::Continue
    }
}

pub struct ImportFileModal<'a> {
    state: &'a mut ImportFileModalState,
}

impl<'a> ImportFileModal<'a> {
    pub fn new(state: &'a mut ImportFileModalState) -> Self {
        Self { state }
    }

    /// Centered, 60% width, 70% height
    pub fn calculate_area(total: Rect) -> Rect {
        let width = (total.width * 60 / 100)
            .max(40)
            .min(total.width.saturating_sub(4));
        let height = (total.height * 70 / 100)
            .max(15)
            .min(total.height.saturating_sub(4));

        let x = (total.width.saturating_sub(width)) / 2;
        let y = (total.height.saturating_sub(height)) / 2;

        Rect::new(x, y, width, height)
    }
}

impl Widget for ImportFileModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 30 || area.height < 8 {
            return;
        }

        Clear.render(area, buf);

        let block = Block::default()
            .title(" Import Bookmarks File ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Current path
            Constraint::Min(3),    // File explorer
            Constraint::Length(1), // Error message
            Constraint::Length(1), // Help bar
        ])
        .split(inner);

        let cwd = self.state.file_explorer.cwd().to_string_lossy().into_owned();
        Paragraph::new(Line::from(vec![
            Span::styled("Path: ", Style::default().fg(Color::DarkGray)),
            Span::styled(cwd, Style::default().fg(Color::Yellow)),
        ]))
        .render(chunks[0], buf);

        self.state.file_explorer.widget().render(chunks[1], buf);

        if let Some(ref error) = self.state.error_message {
            Paragraph::new(Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))))
                .render(chunks[2], buf);
        }

        Paragraph::new(Line::from(vec![
            Span::styled(" h/j/k/l ", Style::default().fg(Color::Cyan)),
            Span::raw("nav "),
            Span::styled(" Enter ", Style::default().fg(Color::Cyan)),
            Span::raw("open/import "),
            Span::styled(" Esc ", Style::default().fg(Color::Cyan)),
            Span::raw("cancel"),
        ]))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);
    }
}
