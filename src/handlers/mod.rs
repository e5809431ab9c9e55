//! Input routing from terminal events to App actions.

pub(crate) mod keyboard;
mod modal;
