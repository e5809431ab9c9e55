//! Folder selector: an expandable tree of bookmark folders with multi-select.

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::bookmarks::BookmarkNode;

/// Result of a key press in the folder selector
#[derive(Debug, PartialEq, Eq)]
pub enum FolderKeyResult {
    Continue,
    Cancel,
    /// Folders chosen, in the order they were picked
    Confirm(Vec<String>),
    NewFolder { parent_id: String, parent_title: String },
}

/// One visible folder line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRow {
    pub id: String,
    pub title: String,
    pub depth: usize,
    pub has_subfolders: bool,
    pub expanded: bool,
}

#[derive(Default)]
pub struct FolderTreeState {
    pub list_state: ListState,
    /// Top-level folders (children of the store root)
    roots: Vec<BookmarkNode>,
    expanded: HashSet<String>,
    selected: Vec<String>,
    rows: Vec<FolderRow>,
}

fn has_subfolders(node: &BookmarkNode) -> bool {
    node.children().iter().any(BookmarkNode::is_folder)
}

/// IDs of every folder in `nodes`, at any depth
fn folder_ids(nodes: &[BookmarkNode]) -> HashSet<&str> {
    fn walk<'a>(nodes: &'a [BookmarkNode], out: &mut HashSet<&'a str>) {
        for node in nodes.iter().filter(|n| n.is_folder()) {
            out.insert(node.id.as_str());
            walk(node.children(), out);
        }
    }
    let mut ids = HashSet::new();
    walk(nodes, &mut ids);
    ids
}

impl FolderTreeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `root`'s folders with a fresh selection
    pub fn reset(&mut self, root: BookmarkNode) {
        self.selected.clear();
        self.expanded.clear();
        self.expanded
            .extend(root.children().iter().filter(|n| n.is_folder()).map(|n| n.id.clone()));
        self.set_root(root);
        self.list_state.select(if self.rows.is_empty() { None } else { Some(0) });
    }

    /// Swap in an updated tree, keeping selection and cursor where possible
    pub fn refresh(&mut self, root: BookmarkNode) {
        let current = self.current().map(|row| row.id.clone());
        self.set_root(root);

        let known = folder_ids(&self.roots);
        self.selected.retain(|id| known.contains(id.as_str()));

        let index = current
            .and_then(|id| self.rows.iter().position(|row| row.id == id))
            .or_else(|| (!self.rows.is_empty()).then_some(0));
        self.list_state.select(index);
    }

    fn set_root(&mut self, root: BookmarkNode) {
        self.roots = root.children.unwrap_or_default();
        self.rebuild_rows();
    }

    fn rebuild_rows(&mut self) {
        fn walk(nodes: &[BookmarkNode], depth: usize, expanded: &HashSet<String>, rows: &mut Vec<FolderRow>) {
            for node in nodes.iter().filter(|n| n.is_folder()) {
                let is_expanded = expanded.contains(&node.id);
                rows.push(FolderRow {
                    id: node.id.clone(),
                    title: node.title.clone(),
                    depth,
                    has_subfolders: has_subfolders(node),
                    expanded: is_expanded,
                });
                if is_expanded {
                    walk(node.children(), depth + 1, expanded, rows);
                }
            }
        }
        self.rows.clear();
        walk(&self.roots, 0, &self.expanded, &mut self.rows);
    }

    pub fn rows(&self) -> &[FolderRow] {
        &self.rows
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn current(&self) -> Option<&FolderRow> {
        self.list_state.selected().and_then(|i| self.rows.get(i))
    }

    /// Expand `id` so its children are visible
    pub fn expand(&mut self, id: &str) {
        if self.expanded.insert(id.to_string()) {
            self.rebuild_rows();
        }
    }

    fn move_by(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, self.rows.len() as isize - 1);
        self.list_state.select(Some(next as usize));
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.current().map(|row| row.id.clone()) else {
            return;
        };
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id);
        }
    }

    fn collapse_or_parent(&mut self) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let Some(row) = self.rows.get(index) else {
            return;
        };
        if row.expanded {
            let id = row.id.clone();
            self.expanded.remove(&id);
            self.rebuild_rows();
        } else if row.depth > 0 {
            let depth = row.depth;
            let parent = self.rows[..index].iter().rposition(|r| r.depth < depth);
            self.list_state.select(parent);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FolderKeyResult {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return FolderKeyResult::Cancel,
            KeyCode::Char('j') | KeyCode::Down => self.move_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_by(-1),
            KeyCode::Char('g') | KeyCode::Home => self.move_by(isize::MIN / 2),
            KeyCode::Char('G') | KeyCode::End => self.move_by(isize::MAX / 2),
            KeyCode::Char('l') | KeyCode::Right => {
                if let Some(row) = self.current().filter(|row| row.has_subfolders) {
                    let id = row.id.clone();
                    self.expand(&id);
                }
            }
            KeyCode::Char('h') | KeyCode::Left => self.collapse_or_parent(),
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('n') => {
                if let Some(row) = self.current() {
                    return FolderKeyResult::NewFolder {
                        parent_id: row.id.clone(),
                        parent_title: row.title.clone(),
                    };
                }
            }
            KeyCode::Enter => {
                // With nothing marked, Enter picks the highlighted folder
                if !self.selected.is_empty() {
                    return FolderKeyResult::Confirm(self.selected.clone());
                }
                if let Some(row) = self.current() {
                    return FolderKeyResult::Confirm(vec![row.id.clone()]);
                }
            }
            _ => {}
        }
        FolderKeyResult::Continue
    }
}

/// Widget for the folder selector
pub struct FolderTree<'a> {
    title: &'a str,
}

impl<'a> FolderTree<'a> {
    pub fn new(title: &'a str) -> Self {
        Self { title }
    }
}

impl StatefulWidget for FolderTree<'_> {
    type State = FolderTreeState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let count = state.selected.len();
        let title = if count > 0 {
            format!(" {} ({count} selected) ", self.title)
        } else {
            format!(" {} ", self.title)
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = state
            .rows
            .iter()
            .map(|row| {
                let checked = state.is_selected(&row.id);
                let mark = if checked {
                    Span::styled("[x] ", Style::default().fg(Color::Green))
                } else {
                    Span::styled("[ ] ", Style::default().fg(Color::DarkGray))
                };
                let arrow = match (row.has_subfolders, row.expanded) {
                    (false, _) => "  ",
                    (true, true) => "▾ ",
                    (true, false) => "▸ ",
                };
                let title_style = if row.depth == 0 {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::raw("  ".repeat(row.depth)),
                    mark,
                    Span::raw(arrow),
                    Span::styled(row.title.clone(), title_style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        StatefulWidget::render(list, inner, buf, &mut state.list_state);
    }
}
