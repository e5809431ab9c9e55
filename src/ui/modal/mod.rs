//! Modal dialogs layered over the current view.

pub mod export_format;
pub mod import_file;
pub mod new_folder;

pub use export_format::{ExportFormatKeyResult, ExportFormatModal, ExportFormatModalState};
pub use import_file::{ImportFileKeyResult, ImportFileModal, ImportFileModalState};
pub use new_folder::{NewFolderKeyResult, NewFolderModal, NewFolderModalState};
