use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, View};
use crate::ui::folder_tree::FolderKeyResult;
use crate::ui::url_input::UrlInputKeyResult;

use super::modal::{forward_key_to_modal, paste_into_modal};

/// Action returned from key handling
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Continue,
    Quit,
}

/// Route a key event to the modal or the current view
pub(crate) fn handle_key_event(app: &mut App, key: KeyEvent) -> KeyAction {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return KeyAction::Continue;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    if app.modal_state.is_open() {
        forward_key_to_modal(app, key);
    } else {
        match app.view {
            View::Home => handle_home_key(app, key),
            View::UrlInput => handle_url_input_key(app, key),
            View::FolderSelector => handle_folder_selector_key(app, key),
            View::DuplicateResults(_) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                    app.dismiss_results();
                }
            }
        }
    }

    if app.should_quit {
        KeyAction::Quit
    } else {
        KeyAction::Continue
    }
}

/// Route bracketed paste text to whatever accepts text
pub(crate) fn handle_paste_event(app: &mut App, text: &str) {
    if app.modal_state.is_open() {
        paste_into_modal(app, text);
    } else if app.view == View::UrlInput {
        app.url_input.paste(text);
    } else if app.view == View::Home {
        // Pasting links on the home screen jumps straight into URL entry
        app.start_add_urls();
        app.url_input.paste(text);
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    let items = app.home_items();
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.home_state.select_next(items.len()),
        KeyCode::Char('k') | KeyCode::Up => app.home_state.select_previous(),
        KeyCode::Enter | KeyCode::Char('l') => {
            let index = app.home_state.list_state.selected().unwrap_or(0);
            if let Some(&item) = items.get(index) {
                app.activate_home_item(item);
            }
        }
        _ => {}
    }
}

fn handle_url_input_key(app: &mut App, key: KeyEvent) {
    match app.url_input.handle_key(key) {
        UrlInputKeyResult::Continue => {}
        UrlInputKeyResult::Cancel => app.view = View::Home,
        UrlInputKeyResult::Submit(links) => app.submit_urls(links),
    }
}

fn handle_folder_selector_key(app: &mut App, key: KeyEvent) {
    match app.folder_tree.handle_key(key) {
        FolderKeyResult::Continue => {}
        FolderKeyResult::Cancel => app.cancel_selection(),
        FolderKeyResult::Confirm(ids) => app.confirm_selection(&ids),
        FolderKeyResult::NewFolder {
            parent_id,
            parent_title,
        } => app.open_new_folder(parent_id, parent_title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmarks::{BookmarkStore, ChromiumStore};
    use crate::config::Config;

    fn press(app: &mut App, code: KeyCode) -> KeyAction {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> App {
        App::with_store(Config::default(), ChromiumStore::in_memory(), None, Vec::new())
    }

    #[test]
    fn add_urls_flow_end_to_end() {
        let mut app = app();
        // Home: "Add URLs" is first without tabs
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::UrlInput);

        handle_paste_event(&mut app, "https://a.example | A");
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(app.view, View::FolderSelector);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::Home);
        assert_eq!(app.store.get_children("1").unwrap()[0].title, "A");
    }

    #[test]
    fn q_quits_from_home_only() {
        let mut app = app();
        app.start_add_urls();
        assert_eq!(press(&mut app, KeyCode::Char('q')), KeyAction::Continue);
        assert_eq!(app.url_input.input.text(), "q");

        press(&mut app, KeyCode::Esc);
        assert_eq!(press(&mut app, KeyCode::Char('q')), KeyAction::Quit);
    }

    #[test]
    fn modal_takes_keys_first() {
        let mut app = app();
        app.open_export_picker();
        press(&mut app, KeyCode::Esc);
        assert!(!app.modal_state.is_open());
        assert_eq!(app.view, View::Home);
    }

    #[test]
    fn paste_on_home_starts_url_entry() {
        let mut app = app();
        handle_paste_event(&mut app, "https://b.example");
        assert_eq!(app.view, View::UrlInput);
        assert_eq!(app.url_input.input.text(), "https://b.example");
    }
}
