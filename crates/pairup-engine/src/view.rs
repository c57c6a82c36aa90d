//! The view model: the editor's current attention.

/// A line/character coordinate, stored in rune (code point) offsets.
///
/// The wire protocol sends UTF-16 offsets; callers convert at the boundary
/// with [`crate::text::char_index_to_rune`] before constructing one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct Position {
    /// Zero-based line index into the owning file's `lines`.
    pub line: usize,
    /// Rune offset into that line.
    pub character: usize,
}

impl Position {
    /// Build a position directly from rune-offset coordinates.
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// A selection span, inclusive start and exclusive end, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SelectionRange {
    /// Start of the selection, inclusive.
    pub start: Position,
    /// End of the selection, exclusive.
    pub end: Position,
}

/// A caret with an optional selection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CursorPosition {
    /// The caret itself.
    pub position: Position,
    /// The selection anchored at this caret, if any.
    pub range: Option<SelectionRange>,
}

impl CursorPosition {
    /// A bare caret with no selection.
    pub fn at(position: Position) -> Self {
        Self { position, range: None }
    }
}

/// The editor's current focus: one active file and one or more carets.
///
/// Multi-cursor is first-class — `cursors` is never expected to hold exactly
/// one entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct View {
    /// The file this view points at.
    pub file_id: u32,
    /// Every caret currently active in that file, in editor-reported order.
    pub cursors: Vec<CursorPosition>,
}

impl View {
    /// A view with a single caret at `position` in `file_id`.
    pub fn single_cursor(file_id: u32, position: Position) -> Self {
        Self { file_id, cursors: vec![CursorPosition::at(position)] }
    }
}
