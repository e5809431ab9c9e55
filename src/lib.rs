//! tabmarks library crate.
//!
//! This library provides the core functionality for tabmarks, including:
//! - Bookmark store access and the import/merge engine
//! - URL list, tab list and Netscape bookmark file parsing
//! - Clipboard export formats
//! - Terminal UI components

pub mod app;
pub mod bookmarks;
pub mod config;
pub mod event_loop;
pub mod export;
mod handlers;
pub mod logging;
pub mod operations;
pub mod parse;
pub mod ui;
pub mod watcher;
