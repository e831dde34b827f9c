//! Top-level UI composition.

use crate::{
    app::state::AppState,
    domain::{ChangeKind, FileSide},
    ui::components::{
        footer,
        header::{self, HeaderModel, Similarity},
        search_box::{self, SearchBoxProps},
    },
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

pub mod components;
mod hints;
pub mod screens;
pub mod theme;

/// Draws the header, diff pane, optional search bar, and footer.
pub fn render(frame: &mut Frame<'_>, state: &mut AppState) {
    let hints = hints::build(state);
    let show_search = state.search.is_focused() || !state.search.query().is_empty();

    let root = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(4),
        Constraint::Length(if show_search { 3 } else { 0 }),
        Constraint::Length(footer::required_height(frame.area().width, &hints)),
    ])
    .split(frame.area());

    header::render(
        frame,
        root[0],
        &HeaderModel {
            app_label: "sidediff".to_owned(),
            old_label: state.file_label(FileSide::Old),
            new_label: state.file_label(FileSide::New),
            mode_label: state.mode.label(),
            operation: state.operation_display(),
            error: state.error_message.clone(),
            similarity: similarity(state),
        },
    );

    screens::diff::render(frame, root[1], state);

    if show_search {
        let query = if state.search.is_focused() {
            state.search.buffer()
        } else {
            state.search.query()
        };
        search_box::render(
            frame,
            root[2],
            SearchBoxProps {
                query,
                focused: state.search.is_focused(),
                placeholder: "type to search both sides",
                status: search_status(state),
            },
        );
    }

    footer::render(frame, root[3], &hints);
}

fn similarity(state: &AppState) -> Option<Similarity> {
    let rows = &state.document().side_by_side.rows;
    if rows.is_empty() {
        return None;
    }

    let unchanged_rows = rows
        .iter()
        .filter(|row| {
            [row.left.as_ref(), row.right.as_ref()]
                .into_iter()
                .all(|piece| piece.is_some_and(|piece| piece.kind == ChangeKind::Unchanged))
        })
        .count();

    Some(Similarity {
        unchanged_rows,
        total_rows: rows.len(),
    })
}

fn search_status(state: &AppState) -> Option<String> {
    if state.search.is_focused() || state.search.query().is_empty() {
        return None;
    }

    let matches = state
        .rows()
        .iter()
        .filter(|row| state.is_match(row))
        .count();
    Some(match matches {
        1 => "1 row".to_owned(),
        count => format!("{count} rows"),
    })
}
