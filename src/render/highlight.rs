//! Highlight ranges for the word-level changes inside one diff row.

use crate::domain::{ChangeKind, DiffPiece};
use ratatui::style::Color;

/// A `[start, start + length)` span of character offsets in a row's text.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct HighlightRange {
    pub start: usize,
    pub length: usize,
}

impl HighlightRange {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Which background a highlighter paints with.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum HighlightRole {
    Insert,
    Delete,
}

/// Insert and delete ranges for one row, each sorted and with adjacent
/// ranges merged.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct LineHighlights {
    pub inserted: Vec<HighlightRange>,
    pub deleted: Vec<HighlightRange>,
}

impl LineHighlights {
    /// Attaches colors to both range lists. The insert highlighter always
    /// comes first.
    pub fn into_highlighters(
        self,
        foreground: Option<Color>,
        background: impl Fn(HighlightRole) -> Color,
    ) -> Vec<TextHighlighter> {
        vec![
            TextHighlighter {
                role: HighlightRole::Insert,
                foreground,
                background: background(HighlightRole::Insert),
                ranges: self.inserted,
            },
            TextHighlighter {
                role: HighlightRole::Delete,
                foreground,
                background: background(HighlightRole::Delete),
                ranges: self.deleted,
            },
        ]
    }
}

/// Ranges plus the colors to draw them with.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TextHighlighter {
    pub role: HighlightRole,
    pub foreground: Option<Color>,
    pub background: Color,
    pub ranges: Vec<HighlightRange>,
}

/// Builds insert/delete ranges over the concatenated text of `sub_pieces`.
///
/// `Modified` pieces are treated as `modified_as`; the deleted side of a
/// paired view passes [`ChangeKind::Deleted`] and the inserted side passes
/// [`ChangeKind::Inserted`]. Returns `None` only when `sub_pieces` is absent.
pub fn build_highlight_ranges(
    sub_pieces: Option<&[DiffPiece]>,
    modified_as: ChangeKind,
) -> Option<LineHighlights> {
    let sub_pieces = sub_pieces?;
    let mut highlights = LineHighlights::default();
    let mut offset = 0usize;

    for piece in sub_pieces {
        if piece.text.is_empty() {
            continue;
        }

        let length = piece.text.chars().count();
        let kind = match piece.kind {
            ChangeKind::Modified => modified_as,
            other => other,
        };
        match kind {
            ChangeKind::Inserted => push_merged(&mut highlights.inserted, offset, length),
            ChangeKind::Deleted => push_merged(&mut highlights.deleted, offset, length),
            ChangeKind::Unchanged | ChangeKind::Modified => {}
        }

        offset += length;
    }

    Some(highlights)
}

/// Appends a range, folding it into the last one when they touch.
fn push_merged(ranges: &mut Vec<HighlightRange>, start: usize, length: usize) {
    if let Some(last) = ranges.last_mut() {
        if last.end() == start {
            last.length += length;
            return;
        }
    }

    ranges.push(HighlightRange::new(start, length));
}

#[cfg(test)]
mod tests {
    use super::{HighlightRange, HighlightRole, LineHighlights, build_highlight_ranges};
    use crate::domain::{ChangeKind, DiffPiece};
    use ratatui::style::Color;

    fn pieces(parts: &[(&str, ChangeKind)]) -> Vec<DiffPiece> {
        parts.iter()
            .map(|(text, kind)| DiffPiece::new(*text, *kind))
            .collect()
    }

    fn covered(ranges: &[HighlightRange]) -> usize {
        ranges.iter().map(|range| range.length).sum()
    }

    #[test]
    fn adjacent_inserts_merge_into_one_range() {
        let sub = pieces(&[
            ("ab", ChangeKind::Unchanged),
            ("cd", ChangeKind::Inserted),
            ("ef", ChangeKind::Inserted),
            ("gh", ChangeKind::Unchanged),
        ]);

        let highlights = build_highlight_ranges(Some(sub.as_slice()), ChangeKind::Inserted)
            .expect("present input");

        assert_eq!(highlights.inserted, vec![HighlightRange::new(2, 4)]);
        assert!(highlights.deleted.is_empty());
    }

    #[test]
    fn modified_piece_follows_reinterpretation() {
        let sub = pieces(&[("x", ChangeKind::Modified)]);

        let as_deleted = build_highlight_ranges(Some(sub.as_slice()), ChangeKind::Deleted)
            .expect("present input");
        assert_eq!(as_deleted.deleted, vec![HighlightRange::new(0, 1)]);
        assert!(as_deleted.inserted.is_empty());

        let as_inserted = build_highlight_ranges(Some(sub.as_slice()), ChangeKind::Inserted)
            .expect("present input");
        assert_eq!(as_inserted.inserted, vec![HighlightRange::new(0, 1)]);
        assert!(as_inserted.deleted.is_empty());
    }

    #[test]
    fn modified_as_unchanged_produces_no_range() {
        let sub = pieces(&[("ab", ChangeKind::Modified), ("cd", ChangeKind::Deleted)]);

        let highlights = build_highlight_ranges(Some(sub.as_slice()), ChangeKind::Unchanged)
            .expect("present input");

        assert!(highlights.inserted.is_empty());
        assert_eq!(highlights.deleted, vec![HighlightRange::new(2, 2)]);
    }

    #[test]
    fn absent_input_differs_from_empty_input() {
        let empty: Vec<DiffPiece> = Vec::new();

        assert_eq!(build_highlight_ranges(None, ChangeKind::Deleted), None);
        assert_eq!(
            build_highlight_ranges(Some(empty.as_slice()), ChangeKind::Deleted),
            Some(LineHighlights::default())
        );
    }

    #[test]
    fn empty_pieces_neither_advance_nor_split_ranges() {
        let sub = pieces(&[
            ("ab", ChangeKind::Deleted),
            ("", ChangeKind::Unchanged),
            ("cd", ChangeKind::Deleted),
            ("", ChangeKind::Inserted),
            ("e", ChangeKind::Inserted),
        ]);

        let highlights = build_highlight_ranges(Some(sub.as_slice()), ChangeKind::Deleted)
            .expect("present input");

        assert_eq!(highlights.deleted, vec![HighlightRange::new(0, 4)]);
        assert_eq!(highlights.inserted, vec![HighlightRange::new(4, 1)]);
    }

    #[test]
    fn unchanged_gaps_keep_ranges_apart() {
        let sub = pieces(&[
            ("a", ChangeKind::Inserted),
            (" ", ChangeKind::Unchanged),
            ("b", ChangeKind::Inserted),
            ("c", ChangeKind::Deleted),
            ("d", ChangeKind::Inserted),
        ]);

        let highlights = build_highlight_ranges(Some(sub.as_slice()), ChangeKind::Inserted)
            .expect("present input");

        assert_eq!(
            highlights.inserted,
            vec![
                HighlightRange::new(0, 1),
                HighlightRange::new(2, 1),
                HighlightRange::new(4, 1),
            ]
        );
        assert_eq!(highlights.deleted, vec![HighlightRange::new(3, 1)]);
        for list in [&highlights.inserted, &highlights.deleted] {
            for pair in list.windows(2) {
                assert!(pair[0].end() < pair[1].start);
            }
        }
    }

    #[test]
    fn range_lengths_account_for_all_text() {
        let sub = pieces(&[
            ("fn ", ChangeKind::Unchanged),
            ("main", ChangeKind::Modified),
            ("(", ChangeKind::Unchanged),
            ("argc", ChangeKind::Deleted),
            (", argv", ChangeKind::Inserted),
            (")", ChangeKind::Unchanged),
        ]);
        let total = sub.iter().map(|piece| piece.text.chars().count()).sum::<usize>();
        let unchanged = sub
            .iter()
            .filter(|piece| piece.kind == ChangeKind::Unchanged)
            .map(|piece| piece.text.chars().count())
            .sum::<usize>();

        let highlights = build_highlight_ranges(Some(sub.as_slice()), ChangeKind::Deleted)
            .expect("present input");

        assert_eq!(
            covered(&highlights.inserted) + covered(&highlights.deleted) + unchanged,
            total
        );
    }

    #[test]
    fn reinterpretation_matches_pre_relabeled_input() {
        let modified = pieces(&[("ab", ChangeKind::Modified), ("cd", ChangeKind::Modified)]);
        let relabeled = pieces(&[("ab", ChangeKind::Deleted), ("cd", ChangeKind::Deleted)]);

        assert_eq!(
            build_highlight_ranges(Some(modified.as_slice()), ChangeKind::Deleted),
            build_highlight_ranges(Some(relabeled.as_slice()), ChangeKind::Inserted)
        );
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        let sub = pieces(&[("héllo ", ChangeKind::Unchanged), ("wörld", ChangeKind::Inserted)]);

        let highlights = build_highlight_ranges(Some(sub.as_slice()), ChangeKind::Inserted)
            .expect("present input");

        assert_eq!(highlights.inserted, vec![HighlightRange::new(6, 5)]);
    }

    #[test]
    fn highlighters_carry_role_colors_and_shared_foreground() {
        let highlights = LineHighlights {
            inserted: vec![HighlightRange::new(0, 2)],
            deleted: vec![HighlightRange::new(3, 1)],
        };

        let highlighters = highlights.into_highlighters(Some(Color::White), |role| match role {
            HighlightRole::Insert => Color::Green,
            HighlightRole::Delete => Color::Red,
        });

        assert_eq!(highlighters.len(), 2);
        assert_eq!(highlighters[0].role, HighlightRole::Insert);
        assert_eq!(highlighters[0].background, Color::Green);
        assert_eq!(highlighters[1].background, Color::Red);
        assert!(
            highlighters
                .iter()
                .all(|highlighter| highlighter.foreground == Some(Color::White))
        );
    }
}
