//! Line and word diffing on top of `similar`.
//!
//! The algorithms live in `similar`; this module only shapes their output
//! into the piece models consumed by the view layer: aligned rows for
//! side-by-side display and an interleaved column for inline display.

use crate::domain::{
    ChangeKind, DiffDocument, DiffPiece, DiffSummary, InlineDiffModel, SideBySideDiffModel,
    SideBySideRow,
};
use similar::{Algorithm, DiffOp, DiffTag, capture_diff_slices};
use std::ops::Range;

/// Line-matching strategy handed to `similar`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum DiffAlgorithm {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl DiffAlgorithm {
    /// Parses a config/CLI value such as `"patience"`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "myers" => Some(Self::Myers),
            "patience" => Some(Self::Patience),
            "lcs" => Some(Self::Lcs),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Myers => "myers",
            Self::Patience => "patience",
            Self::Lcs => "lcs",
        }
    }

    fn as_similar(self) -> Algorithm {
        match self {
            Self::Myers => Algorithm::Myers,
            Self::Patience => Algorithm::Patience,
            Self::Lcs => Algorithm::Lcs,
        }
    }
}

/// Comparison settings. Normalization only affects matching; pieces always
/// carry the original line text.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct DiffOptions {
    pub ignore_whitespace: bool,
    pub ignore_case: bool,
    pub algorithm: DiffAlgorithm,
}

/// Diffs two texts once and builds both presentations from the same ops.
pub fn build_document(old: &str, new: &str, options: &DiffOptions) -> DiffDocument {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);
    let ops = line_ops(&old_lines, &new_lines, options);

    let document = DiffDocument {
        side_by_side: side_by_side_from_ops(&ops, &old_lines, &new_lines, options),
        inline: inline_from_ops(&ops, &old_lines, &new_lines, options),
        summary: summarize(&ops),
    };

    log::debug!(
        "diffed {} old / {} new lines with {}: +{} -{} ~{}",
        old_lines.len(),
        new_lines.len(),
        options.algorithm.label(),
        document.summary.inserted,
        document.summary.deleted,
        document.summary.modified
    );

    document
}

/// Builds aligned rows for side-by-side display.
pub fn build_side_by_side(old: &str, new: &str, options: &DiffOptions) -> SideBySideDiffModel {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);
    let ops = line_ops(&old_lines, &new_lines, options);
    side_by_side_from_ops(&ops, &old_lines, &new_lines, options)
}

/// Builds one interleaved column for inline display.
pub fn build_inline(old: &str, new: &str, options: &DiffOptions) -> InlineDiffModel {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);
    let ops = line_ops(&old_lines, &new_lines, options);
    inline_from_ops(&ops, &old_lines, &new_lines, options)
}

fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }

    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

fn comparison_key(line: &str, options: &DiffOptions) -> String {
    let key = if options.ignore_whitespace {
        line.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        line.to_owned()
    };

    if options.ignore_case {
        key.to_lowercase()
    } else {
        key
    }
}

fn line_ops(old_lines: &[&str], new_lines: &[&str], options: &DiffOptions) -> Vec<DiffOp> {
    let old_keys = old_lines
        .iter()
        .map(|line| comparison_key(line, options))
        .collect::<Vec<_>>();
    let new_keys = new_lines
        .iter()
        .map(|line| comparison_key(line, options))
        .collect::<Vec<_>>();

    capture_diff_slices(options.algorithm.as_similar(), &old_keys, &new_keys)
}

fn side_by_side_from_ops(
    ops: &[DiffOp],
    old_lines: &[&str],
    new_lines: &[&str],
    options: &DiffOptions,
) -> SideBySideDiffModel {
    let mut rows = Vec::new();

    for op in ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {
                for (old_index, new_index) in old_range.zip(new_range) {
                    rows.push(SideBySideRow {
                        left: Some(line_piece(old_lines, old_index, ChangeKind::Unchanged)),
                        right: Some(line_piece(new_lines, new_index, ChangeKind::Unchanged)),
                    });
                }
            }
            DiffTag::Delete => rows.extend(old_range.map(|index| SideBySideRow {
                left: Some(line_piece(old_lines, index, ChangeKind::Deleted)),
                right: None,
            })),
            DiffTag::Insert => rows.extend(new_range.map(|index| SideBySideRow {
                left: None,
                right: Some(line_piece(new_lines, index, ChangeKind::Inserted)),
            })),
            DiffTag::Replace => {
                let paired = paired_len(&old_range, &new_range);
                for offset in 0..paired {
                    let old_index = old_range.start + offset;
                    let new_index = new_range.start + offset;
                    let (left_subs, right_subs) =
                        word_sub_pieces(old_lines[old_index], new_lines[new_index], options);
                    rows.push(SideBySideRow {
                        left: Some(
                            line_piece(old_lines, old_index, ChangeKind::Modified)
                                .with_sub_pieces(left_subs),
                        ),
                        right: Some(
                            line_piece(new_lines, new_index, ChangeKind::Modified)
                                .with_sub_pieces(right_subs),
                        ),
                    });
                }
                rows.extend(old_range.skip(paired).map(|index| SideBySideRow {
                    left: Some(line_piece(old_lines, index, ChangeKind::Deleted)),
                    right: None,
                }));
                rows.extend(new_range.skip(paired).map(|index| SideBySideRow {
                    left: None,
                    right: Some(line_piece(new_lines, index, ChangeKind::Inserted)),
                }));
            }
        }
    }

    SideBySideDiffModel { rows }
}

fn inline_from_ops(
    ops: &[DiffOp],
    old_lines: &[&str],
    new_lines: &[&str],
    options: &DiffOptions,
) -> InlineDiffModel {
    let mut lines = Vec::new();

    for op in ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => lines.extend(
                new_range.map(|index| line_piece(new_lines, index, ChangeKind::Unchanged)),
            ),
            DiffTag::Delete => lines.extend(old_range.map(|index| removed_line(old_lines, index))),
            DiffTag::Insert => lines.extend(
                new_range.map(|index| line_piece(new_lines, index, ChangeKind::Inserted)),
            ),
            DiffTag::Replace => {
                let paired = paired_len(&old_range, &new_range);
                let mut removed = Vec::with_capacity(old_range.len());
                let mut added = Vec::with_capacity(new_range.len());

                for offset in 0..paired {
                    let old_index = old_range.start + offset;
                    let new_index = new_range.start + offset;
                    let (left_subs, right_subs) =
                        word_sub_pieces(old_lines[old_index], new_lines[new_index], options);
                    removed.push(removed_line(old_lines, old_index).with_sub_pieces(left_subs));
                    // Inline rows reinterpret Modified as Deleted, so the new
                    // side must carry explicit insert kinds.
                    added.push(
                        line_piece(new_lines, new_index, ChangeKind::Inserted)
                            .with_sub_pieces(relabel_modified(right_subs, ChangeKind::Inserted)),
                    );
                }
                removed.extend(
                    old_range
                        .skip(paired)
                        .map(|index| removed_line(old_lines, index)),
                );
                added.extend(
                    new_range
                        .skip(paired)
                        .map(|index| line_piece(new_lines, index, ChangeKind::Inserted)),
                );

                lines.extend(removed);
                lines.extend(added);
            }
        }
    }

    InlineDiffModel { lines }
}

fn summarize(ops: &[DiffOp]) -> DiffSummary {
    let mut summary = DiffSummary::default();

    for op in ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {}
            DiffTag::Delete => summary.deleted += old_range.len(),
            DiffTag::Insert => summary.inserted += new_range.len(),
            DiffTag::Replace => {
                let paired = paired_len(&old_range, &new_range);
                summary.modified += paired;
                summary.deleted += old_range.len() - paired;
                summary.inserted += new_range.len() - paired;
            }
        }
    }

    summary
}

fn paired_len(old_range: &Range<usize>, new_range: &Range<usize>) -> usize {
    old_range.len().min(new_range.len())
}

fn line_piece(lines: &[&str], index: usize, kind: ChangeKind) -> DiffPiece {
    DiffPiece::new(lines[index], kind).with_position(index + 1)
}

/// Deleted lines have no position in the new text.
fn removed_line(lines: &[&str], index: usize) -> DiffPiece {
    DiffPiece::new(lines[index], ChangeKind::Deleted)
}

/// Word-level pieces for a pair of changed lines: `(old side, new side)`.
///
/// Tokens are compared by the same normalized keys as lines, so words that
/// only differ in ignored case or whitespace stay unchanged. Pieces carry the
/// original token text.
fn word_sub_pieces(
    old: &str,
    new: &str,
    options: &DiffOptions,
) -> (Vec<DiffPiece>, Vec<DiffPiece>) {
    let old_tokens = split_words(old);
    let new_tokens = split_words(new);
    let old_keys = old_tokens
        .iter()
        .map(|token| word_key(token, options))
        .collect::<Vec<_>>();
    let new_keys = new_tokens
        .iter()
        .map(|token| word_key(token, options))
        .collect::<Vec<_>>();

    let mut left = Vec::new();
    let mut right = Vec::new();

    for op in capture_diff_slices(options.algorithm.as_similar(), &old_keys, &new_keys) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        let old_text = old_tokens[old_range].concat();
        let new_text = new_tokens[new_range].concat();
        match tag {
            DiffTag::Equal => {
                left.push(DiffPiece::new(old_text, ChangeKind::Unchanged));
                right.push(DiffPiece::new(new_text, ChangeKind::Unchanged));
            }
            DiffTag::Delete => left.push(DiffPiece::new(old_text, ChangeKind::Deleted)),
            DiffTag::Insert => right.push(DiffPiece::new(new_text, ChangeKind::Inserted)),
            DiffTag::Replace => {
                left.push(DiffPiece::new(old_text, ChangeKind::Modified));
                right.push(DiffPiece::new(new_text, ChangeKind::Modified));
            }
        }
    }

    (left, right)
}

/// Splits a line into alternating runs of whitespace and non-whitespace.
fn split_words(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0usize;
    let mut in_space = None;

    for (index, ch) in line.char_indices() {
        let space = ch.is_whitespace();
        if in_space.is_some_and(|previous| previous != space) {
            tokens.push(&line[start..index]);
            start = index;
        }
        in_space = Some(space);
    }
    if start < line.len() {
        tokens.push(&line[start..]);
    }

    tokens
}

fn word_key(token: &str, options: &DiffOptions) -> String {
    if options.ignore_whitespace && token.chars().all(char::is_whitespace) {
        " ".to_owned()
    } else if options.ignore_case {
        token.to_lowercase()
    } else {
        token.to_owned()
    }
}

fn relabel_modified(pieces: Vec<DiffPiece>, kind: ChangeKind) -> Vec<DiffPiece> {
    pieces
        .into_iter()
        .map(|mut piece| {
            if piece.kind == ChangeKind::Modified {
                piece.kind = kind;
            }
            piece
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        DiffAlgorithm, DiffOptions, build_document, build_inline, build_side_by_side,
        split_lines, split_words,
    };
    use crate::domain::{ChangeKind, DiffPiece};

    fn concat(pieces: &[DiffPiece]) -> String {
        pieces.iter().map(|piece| piece.text.as_str()).collect()
    }

    #[test]
    fn split_lines_handles_trailing_newline_and_crlf() {
        assert_eq!(split_lines(""), Vec::<&str>::new());
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("\n"), vec![""]);
    }

    #[test]
    fn identical_texts_are_all_unchanged() {
        let document = build_document("one\ntwo\n", "one\ntwo\n", &DiffOptions::default());

        assert!(document.summary.is_identical());
        assert_eq!(document.side_by_side.rows.len(), 2);
        assert!(document.side_by_side.rows.iter().all(|row| {
            row.left.as_ref().map(|piece| piece.kind) == Some(ChangeKind::Unchanged)
                && row.right.as_ref().map(|piece| piece.kind) == Some(ChangeKind::Unchanged)
        }));
        assert_eq!(document.inline.lines.len(), 2);
    }

    #[test]
    fn pure_insertion_leaves_a_left_gap() {
        let model = build_side_by_side("a\nc\n", "a\nb\nc\n", &DiffOptions::default());

        assert_eq!(model.rows.len(), 3);
        let inserted = &model.rows[1];
        assert!(inserted.left.is_none());
        let right = inserted.right.as_ref().expect("right piece");
        assert_eq!(right.kind, ChangeKind::Inserted);
        assert_eq!(right.text, "b");
        assert_eq!(right.position, Some(2));
    }

    #[test]
    fn pure_deletion_leaves_a_right_gap() {
        let model = build_side_by_side("a\nb\nc\n", "a\nc\n", &DiffOptions::default());

        let deleted = &model.rows[1];
        assert!(deleted.right.is_none());
        assert_eq!(
            deleted.left.as_ref().map(|piece| piece.kind),
            Some(ChangeKind::Deleted)
        );
    }

    #[test]
    fn replaced_lines_pair_up_with_word_sub_pieces() {
        let document = build_document(
            "let x = 1;\nkeep\n",
            "let x = 2;\nkeep\n",
            &DiffOptions::default(),
        );

        assert_eq!(document.summary.modified, 1);
        let row = &document.side_by_side.rows[0];
        let left = row.left.as_ref().expect("left piece");
        let right = row.right.as_ref().expect("right piece");
        assert_eq!(left.kind, ChangeKind::Modified);
        assert_eq!(right.kind, ChangeKind::Modified);
        assert_eq!(concat(&left.sub_pieces), "let x = 1;");
        assert_eq!(concat(&right.sub_pieces), "let x = 2;");
        assert!(
            left.sub_pieces
                .iter()
                .any(|piece| piece.kind == ChangeKind::Modified && piece.text == "1;")
        );
        assert!(
            right
                .sub_pieces
                .iter()
                .any(|piece| piece.kind == ChangeKind::Modified && piece.text == "2;")
        );
    }

    #[test]
    fn inline_replacement_lists_removed_before_added() {
        let model = build_inline("old line\n", "new line\n", &DiffOptions::default());

        assert_eq!(model.lines.len(), 2);
        assert_eq!(model.lines[0].kind, ChangeKind::Deleted);
        assert_eq!(model.lines[0].position, None);
        assert_eq!(model.lines[1].kind, ChangeKind::Inserted);
        assert_eq!(model.lines[1].position, Some(1));
        assert!(
            model.lines[1]
                .sub_pieces
                .iter()
                .all(|piece| piece.kind != ChangeKind::Modified)
        );
    }

    #[test]
    fn surplus_replaced_lines_become_plain_inserts() {
        let document = build_document("a\n", "b\nc\n", &DiffOptions::default());

        assert_eq!(document.summary.modified, 1);
        assert_eq!(document.summary.inserted, 1);
        assert_eq!(document.summary.deleted, 0);
        let last = document.side_by_side.rows.last().expect("rows");
        assert!(last.left.is_none());
        assert_eq!(
            last.right.as_ref().map(|piece| piece.text.as_str()),
            Some("c")
        );
    }

    #[test]
    fn ignore_options_only_affect_matching() {
        let options = DiffOptions {
            ignore_whitespace: true,
            ignore_case: true,
            algorithm: DiffAlgorithm::Patience,
        };
        let model = build_side_by_side("Hello   World\n", "hello world\n", &options);

        assert_eq!(model.rows.len(), 1);
        let row = &model.rows[0];
        assert_eq!(
            row.left.as_ref().map(|piece| (piece.kind, piece.text.as_str())),
            Some((ChangeKind::Unchanged, "Hello   World"))
        );
        assert_eq!(
            row.right.as_ref().map(|piece| piece.text.as_str()),
            Some("hello world")
        );
    }

    #[test]
    fn split_words_alternates_space_and_word_runs() {
        assert_eq!(split_words("let  x=1;"), vec!["let", "  ", "x=1;"]);
        assert_eq!(split_words(" a"), vec![" ", "a"]);
        assert_eq!(split_words(""), Vec::<&str>::new());
    }

    #[test]
    fn ignore_case_also_applies_to_word_highlights() {
        let options = DiffOptions {
            ignore_case: true,
            ..DiffOptions::default()
        };
        let model = build_side_by_side("Let X = 1;\n", "let x = 2;\n", &options);

        let row = &model.rows[0];
        let left = row.left.as_ref().expect("left piece");
        let right = row.right.as_ref().expect("right piece");
        assert_eq!(concat(&left.sub_pieces), "Let X = 1;");
        assert_eq!(concat(&right.sub_pieces), "let x = 2;");
        let changed = |pieces: &[DiffPiece]| {
            pieces
                .iter()
                .filter(|piece| piece.kind != ChangeKind::Unchanged)
                .map(|piece| piece.text.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(changed(&left.sub_pieces), ["1;"]);
        assert_eq!(changed(&right.sub_pieces), ["2;"]);
    }

    #[test]
    fn algorithm_parse_accepts_known_names() {
        assert_eq!(DiffAlgorithm::parse("Patience"), Some(DiffAlgorithm::Patience));
        assert_eq!(DiffAlgorithm::parse(" lcs "), Some(DiffAlgorithm::Lcs));
        assert_eq!(DiffAlgorithm::parse("histogram"), None);
    }
}
