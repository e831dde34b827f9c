//! Diff pane: side-by-side and inline rows with word-level highlights.

use crate::app::state::AppState;
use crate::domain::{ChangeKind, DiffPiece};
use crate::render::highlight::TextHighlighter;
use crate::render::view_model::{
    DiffLineView, InlineLineViewModel, LineViewModel, SideBySideLineViewModel,
};
use crate::ui::theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthChar;

const SEPARATOR: &str = " │ ";
const MARKER_WIDTH: usize = 2;
const NUMBER_WIDTH: usize = 6;
/// Tabs advance to the next multiple of this many columns.
const TAB_WIDTH: usize = 4;

/// Renders the diff pane for the active mode.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &mut AppState) {
    let block = Block::default()
        .title(Span::styled(pane_title(state), theme::title()))
        .borders(Borders::ALL)
        .border_style(theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    state.sync_viewport(usize::from(inner.height));

    if state.row_count() == 0 {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(empty_message(state), theme::dim()))),
            inner,
        );
        return;
    }

    let lines = render_rows(DiffRowsRenderContext {
        state: &*state,
        width: inner.width,
        row_offset: state.scroll(),
        row_limit: usize::from(inner.height),
    });
    frame.render_widget(Paragraph::new(lines), inner);
}

fn pane_title(state: &AppState) -> String {
    let summary = &state.document().summary;
    let mut title = format!(
        " {} · row {}/{} · +{} -{} ~{} ",
        state.mode.label(),
        selected_line_number(state),
        state.row_count(),
        summary.inserted,
        summary.deleted,
        summary.modified
    );
    let options = state.options();
    if options.ignore_whitespace {
        title.push_str("[ws] ");
    }
    if options.ignore_case {
        title.push_str("[case] ");
    }
    title
}

fn selected_line_number(state: &AppState) -> usize {
    state
        .rows()
        .get(state.selected())
        .map_or(0, DiffLineView::line_number)
}

fn empty_message(state: &AppState) -> String {
    if state.is_busy() {
        "  waiting for files...".to_owned()
    } else {
        "  nothing to compare; press o or O to choose files".to_owned()
    }
}

pub(crate) struct DiffRowsRenderContext<'a> {
    pub state: &'a AppState,
    pub width: u16,
    pub row_offset: usize,
    pub row_limit: usize,
}

pub(crate) fn render_rows(context: DiffRowsRenderContext<'_>) -> Vec<Line<'static>> {
    let DiffRowsRenderContext {
        state,
        width,
        row_offset,
        row_limit,
    } = context;

    let width = usize::from(width.max(1));
    let selected = state.selected();

    state
        .rows()
        .iter()
        .enumerate()
        .skip(row_offset)
        .take(row_limit)
        .map(|(index, row)| {
            let (marker, marker_style) = if index == selected {
                ("▌ ", theme::selected())
            } else if state.is_match(row) {
                ("● ", theme::search_match())
            } else {
                ("  ", theme::dim())
            };

            let mut spans = vec![Span::styled(marker.to_owned(), marker_style)];
            match row {
                LineViewModel::SideBySide(row) => spans.extend(side_by_side_spans(row, width)),
                LineViewModel::Inline(row) => spans.extend(inline_spans(row, width)),
            }
            Line::from(spans)
        })
        .collect()
}

fn side_by_side_spans(row: &SideBySideLineViewModel<'_>, width: usize) -> Vec<Span<'static>> {
    let available = width.saturating_sub(MARKER_WIDTH + SEPARATOR.chars().count());
    let left_width = available / 2;
    let right_width = available.saturating_sub(left_width);

    let left_fg = row.left().map(piece_fg);
    let right_fg = row.right().map(piece_fg);

    let mut spans = render_side(SideRenderContext {
        piece: row.left(),
        number: row.left().and_then(|piece| piece.position),
        highlighters: row.left_highlighters(left_fg),
        sign: None,
        width: left_width,
    });
    spans.push(Span::styled(SEPARATOR.to_owned(), theme::dim()));
    spans.extend(render_side(SideRenderContext {
        piece: row.right(),
        number: row.right().and_then(|piece| piece.position),
        highlighters: row.right_highlighters(right_fg),
        sign: None,
        width: right_width,
    }));
    spans
}

fn inline_spans(row: &InlineLineViewModel<'_>, width: usize) -> Vec<Span<'static>> {
    let width = width.saturating_sub(MARKER_WIDTH);
    let fg = row.line().map(piece_fg);
    let sign = row.line().map(|piece| match piece.kind {
        ChangeKind::Inserted => '+',
        ChangeKind::Deleted => '-',
        ChangeKind::Modified => '~',
        ChangeKind::Unchanged => ' ',
    });

    // The inline gutter numbers rows of the unified stream, so deleted lines
    // are numbered too.
    render_side(SideRenderContext {
        piece: row.line(),
        number: Some(row.line_number()),
        highlighters: row.highlighters(fg),
        sign,
        width,
    })
}

fn piece_fg(piece: &DiffPiece) -> Color {
    let style = match piece.kind {
        ChangeKind::Inserted => theme::insert_line(),
        ChangeKind::Deleted => theme::delete_line(),
        ChangeKind::Unchanged | ChangeKind::Modified => theme::text(),
    };
    style.fg.unwrap_or(Color::Reset)
}

struct SideRenderContext<'a> {
    piece: Option<&'a DiffPiece>,
    number: Option<usize>,
    highlighters: Option<Vec<TextHighlighter>>,
    sign: Option<char>,
    width: usize,
}

fn render_side(context: SideRenderContext<'_>) -> Vec<Span<'static>> {
    let SideRenderContext {
        piece,
        number,
        highlighters,
        sign,
        width,
    } = context;
    if width == 0 {
        return Vec::new();
    }

    let number_width = width.min(NUMBER_WIDTH);
    let mut text_width = width.saturating_sub(number_width);

    let Some(piece) = piece else {
        return vec![
            Span::styled(" ".repeat(number_width), theme::line_number()),
            Span::styled(hatched_filler(text_width), theme::gap()),
        ];
    };

    let number = number.map_or_else(|| " ".repeat(number_width), |value| format!("{value:>5} "));
    let number: String = number.chars().take(number_width).collect();
    let mut spans = vec![Span::styled(number, theme::line_number())];

    let base_style = Style::default().fg(piece_fg(piece));
    if let Some(sign) = sign {
        if text_width > 0 {
            spans.push(Span::styled(format!("{sign} "), base_style));
            text_width = text_width.saturating_sub(2);
        }
    }

    let chars = piece.text.chars().collect::<Vec<_>>();
    let cell_styles = highlight_cell_styles(
        chars.len(),
        base_style,
        highlighters.as_deref().unwrap_or_default(),
    );
    let (cells, used) = render_cells(&chars, &cell_styles, base_style, text_width);
    spans.extend(cells);

    if used < text_width {
        spans.push(Span::raw(" ".repeat(text_width - used)));
    }
    spans
}

/// Per-character styles after painting every highlighter's ranges. Ranges
/// are char offsets, so this runs before tab expansion. Later highlighters
/// win where ranges overlap.
fn highlight_cell_styles(
    len: usize,
    base_style: Style,
    highlighters: &[TextHighlighter],
) -> Vec<Style> {
    let mut styles = vec![base_style; len];
    for highlighter in highlighters {
        let mut style = base_style.bg(highlighter.background);
        if let Some(foreground) = highlighter.foreground {
            style = style.fg(foreground);
        }

        for range in &highlighter.ranges {
            let start = range.start.min(len);
            let end = range.end().min(len);
            for cell in styles.iter_mut().take(end).skip(start) {
                *cell = style;
            }
        }
    }
    styles
}

/// Groups styled chars into spans that fit in `max_cols` terminal columns.
/// Tabs expand to the next tab stop, wide chars take two columns, and a char
/// that would overflow ends the row. Returns the spans and the columns used.
fn render_cells(
    chars: &[char],
    styles: &[Style],
    base_style: Style,
    max_cols: usize,
) -> (Vec<Span<'static>>, usize) {
    let mut spans = Vec::new();
    let mut buffer = String::new();
    let mut current_style: Option<Style> = None;
    let mut col = 0usize;

    for (ch, style) in chars.iter().copied().zip(styles.iter().copied()) {
        let width = cell_width(ch, col);
        if col + width > max_cols {
            break;
        }

        if current_style != Some(style) {
            if !buffer.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut buffer),
                    current_style.unwrap_or(base_style),
                ));
            }
            current_style = Some(style);
        }

        if ch == '\t' {
            buffer.push_str(&" ".repeat(width));
        } else if ch.width().is_some() {
            buffer.push(ch);
        }
        col += width;
    }

    if !buffer.is_empty() {
        spans.push(Span::styled(buffer, current_style.unwrap_or(base_style)));
    }

    (spans, col)
}

/// Columns `ch` occupies when drawn at column `col`. Control chars are
/// dropped and take none.
fn cell_width(ch: char, col: usize) -> usize {
    if ch == '\t' {
        TAB_WIDTH - col % TAB_WIDTH
    } else {
        ch.width().unwrap_or(0)
    }
}

fn hatched_filler(width: usize) -> String {
    "╱".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::{cell_width, highlight_cell_styles, render, render_cells};
    use crate::app::state::AppState;
    use crate::diff::DiffOptions;
    use crate::domain::{FileSide, ViewMode};
    use crate::files::LoadedFile;
    use crate::render::highlight::{HighlightRange, HighlightRole, TextHighlighter};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::style::{Color, Style};
    use std::path::PathBuf;

    fn state_with(mode: ViewMode, old: &str, new: &str) -> AppState {
        let mut state = AppState::new(mode, DiffOptions::default());
        for (side, name, text) in [(FileSide::Old, "a.txt", old), (FileSide::New, "b.txt", new)] {
            state.set_file(
                side,
                LoadedFile {
                    path: PathBuf::from(name),
                    text: text.to_owned(),
                },
            );
        }
        state
    }

    fn draw_buffer(state: &mut AppState, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, state);
            })
            .unwrap();

        terminal.backend().buffer().clone()
    }

    fn draw(state: &mut AppState, width: u16, height: u16) -> String {
        let buffer = draw_buffer(state, width, height);
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn side_by_side_shows_both_texts_and_gap_filler() {
        let mut state = state_with(ViewMode::SideBySide, "keep\ngone\n", "keep\n");

        let screen = draw(&mut state, 60, 6);

        assert!(screen.contains("keep"));
        assert!(screen.contains("gone"));
        assert!(screen.contains("╱"));
        assert!(screen.contains("+0 -1 ~0"));
    }

    #[test]
    fn inline_mode_prefixes_signs() {
        let mut state = state_with(ViewMode::Inline, "one\n", "two\n");

        let screen = draw(&mut state, 40, 6);

        assert!(screen.contains("- one"));
        assert!(screen.contains("+ two"));
    }

    #[test]
    fn empty_state_prompts_for_files() {
        let mut state = AppState::new(ViewMode::SideBySide, DiffOptions::default());

        let screen = draw(&mut state, 70, 4);

        assert!(screen.contains("press o or O"));
    }

    #[test]
    fn highlight_ranges_paint_background_and_merge_spans() {
        let base = Style::default().fg(Color::White);
        let highlighters = vec![TextHighlighter {
            role: HighlightRole::Insert,
            foreground: Some(Color::Green),
            background: Color::Blue,
            ranges: vec![HighlightRange::new(2, 2), HighlightRange::new(8, 5)],
        }];

        let styles = highlight_cell_styles(10, base, &highlighters);
        assert_eq!(styles[1], base);
        assert_eq!(styles[2], base.fg(Color::Green).bg(Color::Blue));
        assert_eq!(styles[9], base.fg(Color::Green).bg(Color::Blue));

        let chars = "abcdefghij".chars().collect::<Vec<_>>();
        let (spans, used) = render_cells(&chars, &styles, base, 40);
        assert_eq!(used, 10);
        let texts = spans
            .iter()
            .map(|span| span.content.to_string())
            .collect::<Vec<_>>();
        assert_eq!(texts, ["ab", "cd", "efgh", "ij"]);
    }

    /// Column of the pane separator on row `y`, skipping the outer border.
    fn separator_column(buffer: &Buffer, y: u16, width: u16) -> Option<u16> {
        (1..width - 1).find(|&x| buffer[(x, y)].symbol() == "│")
    }

    #[test]
    fn tabs_expand_and_keep_the_separator_aligned() {
        let mut state = state_with(
            ViewMode::SideBySide,
            "\t\tx = 1\nplain\n",
            "\t\tx = 2\nplain\n",
        );

        let buffer = draw_buffer(&mut state, 50, 6);
        let screen = draw(&mut state, 50, 6);

        assert!(screen.contains("1         x = 1"));
        assert_eq!(
            separator_column(&buffer, 1, 50),
            separator_column(&buffer, 2, 50)
        );
        assert!(separator_column(&buffer, 1, 50).is_some());
    }

    #[test]
    fn wide_chars_keep_the_separator_aligned() {
        let mut state = state_with(
            ViewMode::SideBySide,
            "漢字漢字 = 1\nplain\n",
            "漢字漢字 = 2\nplain\n",
        );

        let buffer = draw_buffer(&mut state, 50, 6);

        assert_eq!(
            separator_column(&buffer, 1, 50),
            separator_column(&buffer, 2, 50)
        );
        let right_edge = (1..49)
            .map(|x| buffer[(x, 1)].symbol().to_owned())
            .collect::<String>();
        assert!(right_edge.contains("= 2"));
    }

    #[test]
    fn wide_char_that_overflows_is_dropped_and_padded() {
        let chars = "漢字".chars().collect::<Vec<_>>();
        let styles = vec![Style::default(); chars.len()];

        let (spans, used) = render_cells(&chars, &styles, Style::default(), 3);

        assert_eq!(used, 2);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "漢");
    }

    #[test]
    fn tab_width_depends_on_column() {
        assert_eq!(cell_width('\t', 0), 4);
        assert_eq!(cell_width('\t', 3), 1);
        assert_eq!(cell_width('漢', 0), 2);
        assert_eq!(cell_width('\u{7}', 0), 0);
    }

    #[test]
    fn inline_gutter_numbers_every_row_and_title_tracks_selection() {
        let mut state = state_with(ViewMode::Inline, "one\nsame\n", "two\nsame\n");
        state.move_to_bottom();

        let screen = draw(&mut state, 40, 7);

        assert!(screen.contains("1 - one"));
        assert!(screen.contains("2 + two"));
        assert!(screen.contains("3   same"));
        assert!(screen.contains("row 3/3"));
    }
}
