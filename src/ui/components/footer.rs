//! Footer component listing key bindings.

use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// A key binding and what it does.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Hint {
    pub key: &'static str,
    pub desc: &'static str,
}

impl Hint {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }

    fn width(&self) -> usize {
        // "[key] desc"
        self.key.chars().count() + 3 + self.desc.chars().count()
    }
}

/// Footer height needed to show every hint at `screen_width`.
pub fn required_height(screen_width: u16, hints: &[Hint]) -> u16 {
    let width = usize::from(screen_width.max(1));
    wrap_hints(hints, width).len().max(1) as u16
}

/// Renders hints centered, wrapping onto as many lines as needed.
pub fn render(frame: &mut Frame<'_>, area: Rect, hints: &[Hint]) {
    let width = usize::from(area.width.max(1));
    let lines = wrap_hints(hints, width);
    let text: Vec<Line<'static>> = if lines.is_empty() {
        vec![Line::from(" ")]
    } else {
        lines.iter().map(|line| styled_line(line)).collect()
    };

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn wrap_hints(hints: &[Hint], width: usize) -> Vec<Vec<Hint>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = Vec::<Hint>::new();
    let mut current_width = 0usize;

    for hint in hints {
        let separator = if current.is_empty() { 0 } else { 2 };
        let projected = current_width + separator + hint.width();

        if projected <= width || current.is_empty() {
            current.push(*hint);
            current_width = projected.min(width);
            continue;
        }

        lines.push(std::mem::take(&mut current));
        current.push(*hint);
        current_width = hint.width().min(width);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn styled_line(hints: &[Hint]) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    for (index, hint) in hints.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  ", theme::dim()));
        }
        spans.push(Span::styled(format!("[{}]", hint.key), theme::info()));
        spans.push(Span::styled(format!(" {}", hint.desc), theme::dim()));
    }
    Line::from(spans)
}
