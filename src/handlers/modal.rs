use crossterm::event::KeyEvent;

use crate::app::{App, ModalState};
use crate::ui::modal::{ExportFormatKeyResult, ImportFileKeyResult, NewFolderKeyResult};

/// Forward a key event to the currently open modal
pub(crate) fn forward_key_to_modal(app: &mut App, key: KeyEvent) {
    match &mut app.modal_state {
        ModalState::None => {}
        ModalState::ImportFile(state) => match state.handle_key(key) {
            ImportFileKeyResult::Continue => {}
            ImportFileKeyResult::Cancel => app.close_modal(),
            ImportFileKeyResult::Selected(path) => app.import_file_selected(path),
        },
        ModalState::ExportFormat(state) => match state.handle_key(key) {
            ExportFormatKeyResult::Continue => {}
            ExportFormatKeyResult::Cancel => app.close_modal(),
            ExportFormatKeyResult::Selected(format) => app.export_format_selected(format),
        },
        ModalState::NewFolder(state) => match state.handle_key(key) {
            NewFolderKeyResult::Continue => {}
            NewFolderKeyResult::Cancel => app.close_modal(),
            NewFolderKeyResult::Confirm(name) => app.confirm_new_folder(&name),
        },
    }
}

/// Forward pasted text to the open modal, if it takes text
pub(crate) fn paste_into_modal(app: &mut App, text: &str) {
    if let ModalState::NewFolder(state) = &mut app.modal_state {
        state.paste(text);
    }
}
