//! Domain models shared across the diff, render, and UI layers.

use std::fmt;

/// How a piece of text changed relative to the comparison baseline.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ChangeKind {
    Unchanged,
    Inserted,
    Deleted,
    Modified,
}

/// A span of text tagged with its change kind.
///
/// Line-level pieces may own finer-grained (word-level) sub-pieces used for
/// in-line highlighting. Sub-pieces never nest further.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DiffPiece {
    pub text: String,
    pub kind: ChangeKind,
    pub position: Option<usize>,
    pub sub_pieces: Vec<DiffPiece>,
}

impl DiffPiece {
    pub fn new(text: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            text: text.into(),
            kind,
            position: None,
            sub_pieces: Vec::new(),
        }
    }

    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_sub_pieces(mut self, sub_pieces: Vec<DiffPiece>) -> Self {
        self.sub_pieces = sub_pieces;
        self
    }
}

/// One aligned row of a side-by-side diff. An absent side is a gap row.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SideBySideRow {
    pub left: Option<DiffPiece>,
    pub right: Option<DiffPiece>,
}

/// Side-by-side diff result: old text on the left, new text on the right.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SideBySideDiffModel {
    pub rows: Vec<SideBySideRow>,
}

/// Unified diff result: one interleaved column of lines.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct InlineDiffModel {
    pub lines: Vec<DiffPiece>,
}

/// Line counts shown in the header.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct DiffSummary {
    pub inserted: usize,
    pub deleted: usize,
    pub modified: usize,
}

impl DiffSummary {
    pub fn is_identical(&self) -> bool {
        self.inserted == 0 && self.deleted == 0 && self.modified == 0
    }
}

/// Both presentations of one comparison, computed together.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct DiffDocument {
    pub side_by_side: SideBySideDiffModel,
    pub inline: InlineDiffModel,
    pub summary: DiffSummary,
}

/// Which presentation the diff body uses.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum ViewMode {
    #[default]
    SideBySide,
    Inline,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::SideBySide => Self::Inline,
            Self::Inline => Self::SideBySide,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SideBySide => "side-by-side",
            Self::Inline => "inline",
        }
    }
}

/// Which input file an operation refers to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FileSide {
    Old,
    New,
}

impl fmt::Display for FileSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Old => write!(f, "old"),
            Self::New => write!(f, "new"),
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged => write!(f, "unchanged"),
            Self::Inserted => write!(f, "inserted"),
            Self::Deleted => write!(f, "deleted"),
            Self::Modified => write!(f, "modified"),
        }
    }
}
