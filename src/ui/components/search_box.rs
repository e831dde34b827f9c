//! One-line search bar shown below the diff pane.

use crate::ui::theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct SearchBoxProps<'a> {
    pub query: &'a str,
    pub focused: bool,
    pub placeholder: &'a str,
    /// Shown right-aligned, e.g. the number of matching rows.
    pub status: Option<String>,
}

pub fn render(frame: &mut Frame<'_>, area: Rect, props: SearchBoxProps<'_>) {
    let (title_style, border_style) = if props.focused {
        (theme::info(), theme::info())
    } else {
        (theme::title(), theme::border())
    };
    let block = Block::default()
        .title(Span::styled(" search ", title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    let (mut left_text, left_style) = if props.query.is_empty() {
        (format!("  {}", props.placeholder), theme::dim())
    } else {
        (format!("  {}", props.query), theme::text())
    };
    if props.focused {
        left_text.push('|');
    }

    let line = line_with_status(
        left_text,
        left_style,
        props.status.as_deref(),
        usize::from(area.width),
    );
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn line_with_status(
    left_text: String,
    left_style: Style,
    status: Option<&str>,
    total_width: usize,
) -> Line<'static> {
    let Some(status) = status else {
        return Line::from(Span::styled(left_text, left_style));
    };

    let status_text = format!(" {status} ");
    let inner_width = total_width.saturating_sub(2);
    let used = left_text.chars().count() + status_text.chars().count();
    let gap = inner_width.saturating_sub(used).max(1);

    Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(gap)),
        Span::styled(status_text, theme::info()),
    ])
}
