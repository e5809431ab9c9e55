//! Terminal UI components: views, modals, and widgets.

pub mod duplicates;
pub mod folder_tree;
pub mod home;
pub mod modal;
pub mod text_input;
pub mod toast;
pub mod toast_widget;
pub mod url_input;

pub use toast::{Toast, ToastManager, ToastType};
pub use toast_widget::ToastWidget;
