use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{poll, read, Event};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::app::{App, ModalState, View};
use crate::handlers::keyboard::{handle_key_event, handle_paste_event, KeyAction};
use crate::ui::duplicates::DuplicateResults;
use crate::ui::folder_tree::FolderTree;
use crate::ui::home::Home;
use crate::ui::modal::{ExportFormatModal, ImportFileModal, NewFolderModal};
use crate::ui::url_input::UrlInput;
use crate::ui::ToastWidget;

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Pick up edits made by the browser
        app.check_store_updates();

        // Update toast manager (remove expired)
        app.toast_manager.update();

        terminal.draw(|f| draw_ui(f, app))?;

        if poll(Duration::from_millis(50))? {
            match read()? {
                Event::Key(key) => {
                    if handle_key_event(app, key) == KeyAction::Quit {
                        return Ok(());
                    }
                }
                Event::Paste(text) => handle_paste_event(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw_ui(f: &mut Frame, app: &mut App) {
    let [main_area, help_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(f.area());

    match &app.view {
        View::Home => {
            let items = app.home_items();
            let home = Home::new(&items, app.tabs.len(), app.store_label());
            f.render_stateful_widget(home, main_area, &mut app.home_state);
        }
        View::UrlInput => f.render_widget(UrlInput::new(&app.url_input), main_area),
        View::FolderSelector => {
            let title = app
                .pending
                .as_ref()
                .map(|action| action.selector_title())
                .unwrap_or_else(|| "Select folders".to_string());
            f.render_stateful_widget(FolderTree::new(&title), main_area, &mut app.folder_tree);
        }
        View::DuplicateResults(report) => f.render_widget(DuplicateResults::new(report), main_area),
    }

    draw_modal(f, app);
    draw_help_bar(f, help_area, app);

    let toasts = app.toast_manager.visible_toasts();
    ToastWidget::new(&toasts).render(f, main_area);
}

fn draw_modal(f: &mut Frame, app: &mut App) {
    let area = f.area();
    match &mut app.modal_state {
        ModalState::None => {}
        ModalState::ImportFile(state) => {
            f.render_widget(ImportFileModal::new(state), ImportFileModal::calculate_area(area));
        }
        ModalState::ExportFormat(state) => {
            f.render_widget(ExportFormatModal::new(state), ExportFormatModal::calculate_area(area));
        }
        ModalState::NewFolder(state) => {
            f.render_widget(NewFolderModal::new(state), NewFolderModal::calculate_area(area));
        }
    }
}

fn draw_help_bar(f: &mut Frame, area: Rect, app: &App) {
    let keys: &[(&str, &str)] = match (&app.modal_state, &app.view) {
        (ModalState::ImportFile(_) | ModalState::ExportFormat(_) | ModalState::NewFolder(_), _) => &[],
        (ModalState::None, View::Home) => &[("j/k", "move"), ("Enter", "select"), ("q", "quit")],
        (ModalState::None, View::UrlInput) => &[
            ("Ctrl+S", "continue"),
            ("Enter", "new line"),
            ("Esc", "back"),
        ],
        (ModalState::None, View::FolderSelector) => &[
            ("j/k", "move"),
            ("h/l", "collapse/expand"),
            ("Space", "mark"),
            ("n", "new folder"),
            ("Enter", "confirm"),
            ("Esc", "cancel"),
        ],
        (ModalState::None, View::DuplicateResults(_)) => &[("Enter", "done")],
    };

    let mut spans = Vec::with_capacity(keys.len() * 2);
    for (key, label) in keys {
        spans.push(Span::styled(format!(" {key} "), Style::default().fg(Color::Black).bg(Color::Cyan)));
        spans.push(Span::raw(format!(" {label}  ")));
    }

    let help = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    f.render_widget(help, area);
}
