//! Per-row view models projected from a computed diff.
//!
//! Rows borrow their pieces from the [`DiffDocument`] and are rebuilt on
//! every frame; nothing here is cached or mutated after construction apart
//! from the line number.

use crate::domain::{
    ChangeKind, DiffDocument, DiffPiece, InlineDiffModel, SideBySideDiffModel, ViewMode,
};
use crate::render::highlight::{LineHighlights, TextHighlighter, build_highlight_ranges};
use crate::ui::theme;
use ratatui::style::Color;

/// Capabilities shared by every displayed diff row.
pub trait DiffLineView {
    fn line_number(&self) -> usize;

    fn set_line_number(&mut self, number: usize);

    /// Whether the row carries no change.
    fn is_unchanged(&self) -> bool;

    /// Whether the row is an alignment gap with no backing piece.
    fn is_null_line(&self) -> bool;

    /// Whether `query` occurs in the row text. An empty query never matches.
    fn contains(&self, query: &str) -> bool;
}

/// A side-by-side row: old text on the left, new text on the right.
#[derive(Debug, Clone, Copy)]
pub struct SideBySideLineViewModel<'a> {
    line_number: usize,
    left: Option<&'a DiffPiece>,
    right: Option<&'a DiffPiece>,
}

impl<'a> SideBySideLineViewModel<'a> {
    pub fn new(
        line_number: usize,
        left: Option<&'a DiffPiece>,
        right: Option<&'a DiffPiece>,
    ) -> Self {
        Self {
            line_number,
            left,
            right,
        }
    }

    pub fn left(&self) -> Option<&'a DiffPiece> {
        self.left
    }

    pub fn right(&self) -> Option<&'a DiffPiece> {
        self.right
    }

    pub fn left_text(&self) -> Option<&'a str> {
        self.left.map(|piece| piece.text.as_str())
    }

    pub fn right_text(&self) -> Option<&'a str> {
        self.right.map(|piece| piece.text.as_str())
    }

    /// Left ranges, with modified words counted as deletions.
    pub fn left_highlights(&self) -> Option<LineHighlights> {
        build_highlight_ranges(
            self.left.map(|piece| piece.sub_pieces.as_slice()),
            ChangeKind::Deleted,
        )
    }

    /// Right ranges, with modified words counted as insertions.
    pub fn right_highlights(&self) -> Option<LineHighlights> {
        build_highlight_ranges(
            self.right.map(|piece| piece.sub_pieces.as_slice()),
            ChangeKind::Inserted,
        )
    }

    pub fn left_highlighters(&self, foreground: Option<Color>) -> Option<Vec<TextHighlighter>> {
        self.left_highlights()
            .map(|highlights| highlights.into_highlighters(foreground, theme::highlight_bg))
    }

    pub fn right_highlighters(&self, foreground: Option<Color>) -> Option<Vec<TextHighlighter>> {
        self.right_highlights()
            .map(|highlights| highlights.into_highlighters(foreground, theme::highlight_bg))
    }
}

impl DiffLineView for SideBySideLineViewModel<'_> {
    fn line_number(&self) -> usize {
        self.line_number
    }

    fn set_line_number(&mut self, number: usize) {
        self.line_number = number;
    }

    // Only the right piece decides row status, so a deletion row (no right
    // piece) reports as a null line.
    fn is_unchanged(&self) -> bool {
        self.right
            .is_some_and(|piece| piece.kind == ChangeKind::Unchanged)
    }

    fn is_null_line(&self) -> bool {
        self.right.is_none()
    }

    fn contains(&self, query: &str) -> bool {
        if query.is_empty() {
            return false;
        }

        self.right_text().is_some_and(|text| text.contains(query))
            || self.left_text().is_some_and(|text| text.contains(query))
    }
}

/// A unified row: one interleaved column of old and new lines.
#[derive(Debug, Clone, Copy)]
pub struct InlineLineViewModel<'a> {
    line_number: usize,
    line: Option<&'a DiffPiece>,
}

impl<'a> InlineLineViewModel<'a> {
    pub fn new(line_number: usize, line: Option<&'a DiffPiece>) -> Self {
        Self { line_number, line }
    }

    pub fn line(&self) -> Option<&'a DiffPiece> {
        self.line
    }

    pub fn text(&self) -> Option<&'a str> {
        self.line.map(|piece| piece.text.as_str())
    }

    /// Line number of the piece in its source text, when it has one.
    pub fn position(&self) -> Option<usize> {
        self.line.and_then(|piece| piece.position)
    }

    pub fn highlights(&self) -> Option<LineHighlights> {
        build_highlight_ranges(
            self.line.map(|piece| piece.sub_pieces.as_slice()),
            ChangeKind::Deleted,
        )
    }

    pub fn highlighters(&self, foreground: Option<Color>) -> Option<Vec<TextHighlighter>> {
        self.highlights()
            .map(|highlights| highlights.into_highlighters(foreground, theme::highlight_bg))
    }
}

impl DiffLineView for InlineLineViewModel<'_> {
    fn line_number(&self) -> usize {
        self.line_number
    }

    fn set_line_number(&mut self, number: usize) {
        self.line_number = number;
    }

    fn is_unchanged(&self) -> bool {
        self.line
            .is_some_and(|piece| piece.kind == ChangeKind::Unchanged)
    }

    fn is_null_line(&self) -> bool {
        self.line.is_none()
    }

    fn contains(&self, query: &str) -> bool {
        if query.is_empty() {
            return false;
        }

        self.text().is_some_and(|text| text.contains(query))
    }
}

/// A row in whichever mode is active.
#[derive(Debug, Clone, Copy)]
pub enum LineViewModel<'a> {
    SideBySide(SideBySideLineViewModel<'a>),
    Inline(InlineLineViewModel<'a>),
}

impl LineViewModel<'_> {
    /// Whether the row should stop change navigation.
    ///
    /// Side-by-side deletion rows count as changes even though they report as
    /// null lines, so this looks at both sides.
    pub fn is_change(&self) -> bool {
        match self {
            Self::SideBySide(row) => [row.left(), row.right()]
                .into_iter()
                .flatten()
                .any(|piece| piece.kind != ChangeKind::Unchanged),
            Self::Inline(row) => row
                .line()
                .is_some_and(|piece| piece.kind != ChangeKind::Unchanged),
        }
    }
}

impl DiffLineView for LineViewModel<'_> {
    fn line_number(&self) -> usize {
        match self {
            Self::SideBySide(row) => row.line_number(),
            Self::Inline(row) => row.line_number(),
        }
    }

    fn set_line_number(&mut self, number: usize) {
        match self {
            Self::SideBySide(row) => row.set_line_number(number),
            Self::Inline(row) => row.set_line_number(number),
        }
    }

    fn is_unchanged(&self) -> bool {
        match self {
            Self::SideBySide(row) => row.is_unchanged(),
            Self::Inline(row) => row.is_unchanged(),
        }
    }

    fn is_null_line(&self) -> bool {
        match self {
            Self::SideBySide(row) => row.is_null_line(),
            Self::Inline(row) => row.is_null_line(),
        }
    }

    fn contains(&self, query: &str) -> bool {
        match self {
            Self::SideBySide(row) => row.contains(query),
            Self::Inline(row) => row.contains(query),
        }
    }
}

/// Projects side-by-side rows, numbered from 1.
pub fn side_by_side_rows(model: &SideBySideDiffModel) -> Vec<SideBySideLineViewModel<'_>> {
    model
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            SideBySideLineViewModel::new(index + 1, row.left.as_ref(), row.right.as_ref())
        })
        .collect()
}

/// Projects inline rows, numbered from 1.
pub fn inline_rows(model: &InlineDiffModel) -> Vec<InlineLineViewModel<'_>> {
    model
        .lines
        .iter()
        .enumerate()
        .map(|(index, line)| InlineLineViewModel::new(index + 1, Some(line)))
        .collect()
}

/// Projects the rows for `mode`.
pub fn document_rows(document: &DiffDocument, mode: ViewMode) -> Vec<LineViewModel<'_>> {
    match mode {
        ViewMode::SideBySide => side_by_side_rows(&document.side_by_side)
            .into_iter()
            .map(LineViewModel::SideBySide)
            .collect(),
        ViewMode::Inline => inline_rows(&document.inline)
            .into_iter()
            .map(LineViewModel::Inline)
            .collect(),
    }
}
