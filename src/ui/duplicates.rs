//! Summary screen shown after duplicate removal.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::operations::DuplicateReport;

pub struct DuplicateResults<'a> {
    report: &'a DuplicateReport,
}

impl<'a> DuplicateResults<'a> {
    pub fn new(report: &'a DuplicateReport) -> Self {
        Self { report }
    }
}

impl Widget for DuplicateResults<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Duplicate Removal ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let removed_style = if self.report.removed_count > 0 {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut lines = vec![
            Line::from(vec![
                Span::raw("Bookmarks checked: "),
                Span::styled(
                    self.report.processed_count.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::raw("Duplicates removed: "),
                Span::styled(self.report.removed_count.to_string(), removed_style),
            ]),
            Line::default(),
            Line::from(Span::styled("Folders:", Style::default().fg(Color::DarkGray))),
        ];
        lines.extend(self.report.folders.iter().map(|(_, name)| {
            Line::from(vec![Span::raw("  • "), Span::styled(name.clone(), Style::default().fg(Color::Yellow))])
        }));
        if self.report.removed_count == 0 {
            lines.push(Line::default());
            lines.push(Line::from("No duplicates found."));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
