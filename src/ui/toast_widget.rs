use crate::ui::toast::{Toast, ToastType};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const MIN_WIDTH: u16 = 24;
const MAX_WIDTH: u16 = 60;

/// Stacks toasts in the bottom-right corner, newest at the bottom.
pub struct ToastWidget<'a> {
    toasts: &'a [&'a Toast],
}

impl<'a> ToastWidget<'a> {
    pub fn new(toasts: &'a [&'a Toast]) -> Self {
        Self { toasts }
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let gap = 1u16;
        let mut bottom = area.bottom().saturating_sub(2);

        for toast in self.toasts.iter().rev() {
            let (width, height) = toast_size(&toast.message, area.width);
            if bottom < area.top() + height {
                break;
            }
            let x = area.right().saturating_sub(width + 2).max(area.left());
            let toast_area = Rect::new(x, bottom - height, width, height);
            bottom = toast_area.top().saturating_sub(gap);

            frame.render_widget(Clear, toast_area);

            let border_style = border_style(toast.toast_type);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .style(Style::default().bg(Color::Black));

            let text = Paragraph::new(Line::from(vec![
                Span::styled(icon(toast.toast_type), border_style.add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::raw(toast.message.clone()),
            ]))
            .block(block)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left);

            frame.render_widget(text, toast_area);
        }
    }
}

/// Width fits the message (plus icon and borders) within bounds; long
/// messages wrap onto extra lines.
fn toast_size(message: &str, available: u16) -> (u16, u16) {
    let max_width = MAX_WIDTH.min(available.saturating_sub(4)).max(MIN_WIDTH);
    let content = u16::try_from(message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let width = content.saturating_add(2).clamp(MIN_WIDTH, max_width);
    let inner = width.saturating_sub(2).max(1);
    let lines = content.div_ceil(inner).max(1);
    (width, lines + 2)
}

fn icon(toast_type: ToastType) -> &'static str {
    match toast_type {
        ToastType::Info => "ℹ",
        ToastType::Success => "✓",
        ToastType::Warning => "⚠",
        ToastType::Error => "✗",
    }
}

fn border_style(toast_type: ToastType) -> Style {
    let color = match toast_type {
        ToastType::Info => Color::Cyan,
        ToastType::Success => Color::Green,
        ToastType::Warning => Color::Yellow,
        ToastType::Error => Color::Red,
    };
    Style::default().fg(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_uses_minimum_width() {
        assert_eq!(toast_size("Saved", 120), (MIN_WIDTH, 3));
    }

    #[test]
    fn long_message_wraps() {
        let message = "x".repeat(100);
        let (width, height) = toast_size(&message, 120);
        assert_eq!(width, MAX_WIDTH);
        assert!(height > 3);
    }

    #[test]
    fn oversized_message_saturates() {
        let message = "x".repeat(usize::from(u16::MAX) + 10);
        let (width, height) = toast_size(&message, 120);
        assert_eq!(width, MAX_WIDTH);
        assert!(height > 3);
    }
}
