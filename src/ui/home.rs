//! Home menu: pick what to do.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeItem {
    BookmarkTabs,
    AddUrls,
    ImportFile,
    ExportFolder,
    RemoveDuplicates,
    Quit,
}

impl HomeItem {
    /// Menu entries; tab bookmarking is only offered when tabs were loaded
    pub fn menu(has_tabs: bool) -> Vec<HomeItem> {
        let mut items = Vec::with_capacity(6);
        if has_tabs {
            items.push(HomeItem::BookmarkTabs);
        }
        items.extend([
            HomeItem::AddUrls,
            HomeItem::ImportFile,
            HomeItem::ExportFolder,
            HomeItem::RemoveDuplicates,
            HomeItem::Quit,
        ]);
        items
    }

    fn label(self, tab_count: usize) -> String {
        match self {
            HomeItem::BookmarkTabs => format!("Bookmark {tab_count} open tabs"),
            HomeItem::AddUrls => "Add URLs".to_string(),
            HomeItem::ImportFile => "Import bookmarks file".to_string(),
            HomeItem::ExportFolder => "Export folder to clipboard".to_string(),
            HomeItem::RemoveDuplicates => "Remove duplicate bookmarks".to_string(),
            HomeItem::Quit => "Quit".to_string(),
        }
    }
}

pub struct HomeState {
    pub list_state: ListState,
}

impl Default for HomeState {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    pub fn select_next(&mut self, len: usize) {
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((i + 1).min(len.saturating_sub(1))));
    }

    pub fn select_previous(&mut self) {
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(i.saturating_sub(1)));
    }
}

pub struct Home<'a> {
    items: &'a [HomeItem],
    tab_count: usize,
    store_label: String,
}

impl<'a> Home<'a> {
    pub fn new(items: &'a [HomeItem], tab_count: usize, store_label: String) -> Self {
        Self {
            items,
            tab_count,
            store_label,
        }
    }
}

impl StatefulWidget for Home<'_> {
    type State = HomeState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .title(" tabmarks ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).split(inner);

        Paragraph::new(Line::from(vec![
            Span::styled("Bookmarks: ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.store_label, Style::default().fg(Color::Yellow)),
        ]))
        .render(chunks[0], buf);

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| ListItem::new(item.label(self.tab_count)))
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        StatefulWidget::render(list, chunks[1], buf, &mut state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_entry_only_with_tabs() {
        assert_eq!(HomeItem::menu(false)[0], HomeItem::AddUrls);
        assert_eq!(HomeItem::menu(true)[0], HomeItem::BookmarkTabs);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = HomeState::new();
        state.select_previous();
        assert_eq!(state.list_state.selected(), Some(0));
        for _ in 0..10 {
            state.select_next(3);
        }
        assert_eq!(state.list_state.selected(), Some(2));
    }
}
