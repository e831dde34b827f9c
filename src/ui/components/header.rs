//! Header component: file names, view mode, status, and similarity.

use crate::ui::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

/// Header payload consumed by the renderer.
#[derive(Debug, Clone)]
pub struct HeaderModel {
    pub app_label: String,
    pub old_label: String,
    pub new_label: String,
    pub mode_label: &'static str,
    pub operation: Option<String>,
    pub error: Option<String>,
    pub similarity: Option<Similarity>,
}

/// Unchanged rows out of all rows in the side-by-side layout.
#[derive(Debug, Clone, Copy)]
pub struct Similarity {
    pub unchanged_rows: usize,
    pub total_rows: usize,
}

impl Similarity {
    fn ratio(self) -> f64 {
        if self.total_rows == 0 {
            1.0
        } else {
            self.unchanged_rows as f64 / self.total_rows as f64
        }
    }
}

/// Renders the header with file names, operation/error state, and similarity gauge.
pub fn render(frame: &mut Frame<'_>, area: Rect, model: &HeaderModel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut left_spans = vec![
        Span::styled(format!(" {}", model.app_label), theme::title()),
        Span::styled(format!("  {}", model.old_label), theme::delete_line()),
        Span::styled(" → ", theme::dim()),
        Span::styled(model.new_label.clone(), theme::insert_line()),
        Span::styled(format!("  [{}]", model.mode_label), theme::dim()),
    ];
    if let Some(error) = &model.error {
        left_spans.push(Span::styled(format!("  error: {error}"), theme::error()));
    } else if let Some(operation) = &model.operation {
        left_spans.push(Span::styled(format!("  {operation}"), theme::info()));
    }
    let left = Line::from(left_spans);

    let Some(similarity) = model.similarity else {
        frame.render_widget(Paragraph::new(left), inner);
        return;
    };

    let right_width = inner.width.min(36);
    let columns =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(right_width)]).split(inner);
    let right_sections = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(14),
    ])
    .split(columns[1]);

    frame.render_widget(Paragraph::new(left), columns[0]);
    frame.render_widget(
        Paragraph::new(Line::from(similarity_text(similarity))).alignment(Alignment::Right),
        right_sections[0],
    );
    frame.render_widget(Paragraph::new(" "), right_sections[1]);
    frame.render_widget(similarity_gauge(similarity), right_sections[2]);
}

fn similarity_text(similarity: Similarity) -> String {
    if similarity.unchanged_rows == similarity.total_rows {
        "identical".to_owned()
    } else {
        format!(
            "same {}/{}",
            similarity.unchanged_rows, similarity.total_rows
        )
    }
}

fn similarity_gauge(similarity: Similarity) -> Gauge<'static> {
    let ratio = similarity.ratio().clamp(0.0, 1.0);
    let percent = (ratio * 100.0).round() as usize;

    Gauge::default()
        .ratio(ratio)
        .label(Span::styled(format!("{percent}%"), theme::text()))
        .gauge_style(theme::insert_line())
        .style(theme::delete_line())
}

#[cfg(test)]
mod tests {
    use super::{Similarity, similarity_text};

    #[test]
    fn similarity_text_reports_identical_files() {
        let same = Similarity {
            unchanged_rows: 4,
            total_rows: 4,
        };
        let partial = Similarity {
            unchanged_rows: 1,
            total_rows: 4,
        };

        assert_eq!(similarity_text(same), "identical");
        assert_eq!(similarity_text(partial), "same 1/4");
        assert!((partial.ratio() - 0.25).abs() < f64::EPSILON);
    }
}
