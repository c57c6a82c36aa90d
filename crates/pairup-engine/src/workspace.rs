//! The workspace state: the single shared mutable store.
//!
//! A single lock guards every open [`File`] and the current [`View`]. Each
//! public operation acquires it for the whole of its mutation, including the
//! call into the event bus, so observers see a total order matching the
//! mutation order. Callers must not re-enter the workspace from inside a
//! subscriber callback — that would deadlock the same lock.

use std::collections::HashMap;

use lsp_types::{Position as WirePosition, Range as WireRange};
use parking_lot::Mutex;

use crate::bus::EventBus;
use crate::document::{File, FileMetadata};
use crate::events::{Event, WorkspaceSnapshot};
use crate::text::{self, RangedChange};
use crate::view::{CursorPosition, Position, SelectionRange, View};

/// A caret update as received from the editor, in UTF-16 wire coordinates.
#[derive(Debug, Clone)]
pub struct WireCursor {
    /// The caret itself.
    pub position: WirePosition,
    /// The selection anchored at this caret, if any.
    pub range: Option<WireRange>,
}

struct Inner {
    files: HashMap<u32, File>,
    filename_to_id: HashMap<String, u32>,
    view: Option<View>,
    next_id: u32,
}

impl Inner {
    fn new() -> Self {
        Self { files: HashMap::new(), filename_to_id: HashMap::new(), view: None, next_id: 0 }
    }
}

/// The engine's single shared mutable store: every open file plus the
/// current view, with a bus to broadcast every mutation.
pub struct WorkspaceState {
    inner: Mutex<Inner>,
    bus: EventBus,
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceState {
    /// An empty workspace: no files, no view, no subscribers.
    pub fn new() -> Self {
        Self { inner: Mutex::new(Inner::new()), bus: EventBus::new() }
    }

    /// The event bus this workspace publishes to.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Register `text` as a newly opened file. Assigns a fresh id and, if
    /// `update_cursor` is set (or no view exists yet), moves the view to a
    /// single cursor at `(0, 0)` in the new file.
    pub fn open_file(&self, filename: &str, text: &str, language: &str, update_cursor: bool) -> u32 {
        let mut inner = self.inner.lock();

        let id = inner.next_id;
        inner.next_id += 1;

        let file = File { filename: filename.to_string(), id, language: language.to_string(), lines: text::split_lines(text) };
        inner.files.insert(id, file);
        inner.filename_to_id.insert(filename.to_string(), id);

        self.bus.publish(&Event::OpenFile { filename: filename.to_string(), id, language: language.to_string() });

        if update_cursor || inner.view.is_none() {
            let view = View::single_cursor(id, Position::new(0, 0));
            inner.view = Some(view.clone());
            self.bus.publish(&Event::ChangeView { view });
        }

        id
    }

    /// Remove `filename`'s file. A no-op if it isn't open.
    pub fn close_file(&self, filename: &str) {
        let mut inner = self.inner.lock();
        let Some(id) = inner.filename_to_id.remove(filename) else {
            return;
        };
        inner.files.remove(&id);
        self.bus.publish(&Event::CloseFile { file_id: id });
    }

    /// Replace `filename`'s entire contents. If `update_cursor`, the cursor
    /// follows the first line that differs between the old and new content.
    pub fn replace_text(&self, filename: &str, text: &str, update_cursor: bool) {
        let mut inner = self.inner.lock();
        let Some(&id) = inner.filename_to_id.get(filename) else {
            return;
        };

        let new_lines = text::split_lines(text);
        let prev_lines = inner.files.get(&id).map(|f| f.lines.clone()).unwrap_or_default();

        if let Some(file) = inner.files.get_mut(&id) {
            file.lines = new_lines.clone();
        }

        self.bus.publish(&Event::ReplaceText { file_id: id, text: new_lines.clone() });

        if update_cursor {
            if let Some(position) = derive_cursor_after_replace(&prev_lines, &new_lines) {
                let view = View::single_cursor(id, position);
                inner.view = Some(view.clone());
                self.bus.publish(&Event::ChangeView { view });
            }
        }
    }

    /// Apply a batch of ranged changes to `filename`. All entries in `changes`
    /// must carry a non-nil range — nil-range changes are routed to the
    /// debounced whole-document path before reaching this operation.
    ///
    /// If `update_cursor`, the cursor lands immediately after the text
    /// inserted by the last change in reverse-document-sorted order.
    pub fn replace_text_ranges(&self, filename: &str, changes: &[RangedChange], update_cursor: bool) {
        if changes.is_empty() {
            return;
        }

        let mut inner = self.inner.lock();
        let Some(&id) = inner.filename_to_id.get(filename) else {
            return;
        };

        let Some(file) = inner.files.get_mut(&id) else {
            return;
        };

        let lines_before = file.lines.clone();
        let applied = text::apply_ranged_changes(&mut file.lines, changes);

        self.bus.publish(&Event::UpdateText { file_id: id, changes: applied });

        if update_cursor {
            let sorted = text::sort_reverse_document_order(changes);
            if let Some(last_change) = sorted.last() {
                let (line, column) = text::insertion_end(&lines_before, last_change);
                let current_lines = &inner.files.get(&id).map(|f| f.lines.clone()).unwrap_or_default();
                let position = clamp_position(current_lines, line, column);
                let view = View::single_cursor(id, position);
                inner.view = Some(view.clone());
                self.bus.publish(&Event::ChangeView { view });
            }
        }
    }

    /// Move the view to `filename` with the given cursors, translating every
    /// character coordinate from UTF-16 to rune offsets against that file's
    /// current content.
    pub fn cursor_move(&self, filename: &str, cursors: &[WireCursor]) {
        let mut inner = self.inner.lock();
        let Some(&id) = inner.filename_to_id.get(filename) else {
            return;
        };
        let Some(lines) = inner.files.get(&id).map(|f| f.lines.clone()) else {
            return;
        };

        let cursors = cursors
            .iter()
            .map(|c| CursorPosition {
                position: convert_position(&lines, c.position),
                range: c.range.map(|r| convert_range(&lines, r)),
            })
            .collect();

        let view = View { file_id: id, cursors };
        inner.view = Some(view.clone());
        self.bus.publish(&Event::ChangeView { view });
    }

    /// Remove every file and the view. Emits no events.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.files.clear();
        inner.filename_to_id.clear();
        inner.view = None;
    }

    /// A deep copy of `filename`'s file, or `None` if it isn't open.
    pub fn get_file(&self, filename: &str) -> Option<File> {
        let inner = self.inner.lock();
        let id = *inner.filename_to_id.get(filename)?;
        inner.files.get(&id).cloned()
    }

    /// Metadata (no line contents) for every open file.
    pub fn get_files(&self) -> Vec<FileMetadata> {
        let inner = self.inner.lock();
        inner.files.values().map(File::metadata).collect()
    }

    /// A copy of the current view, if any file has ever been opened.
    pub fn get_view(&self) -> Option<View> {
        self.inner.lock().view.clone()
    }

    /// A point-in-time snapshot for a newly-connected observer: the current
    /// view plus metadata for every open file.
    pub fn snapshot(&self) -> WorkspaceSnapshot {
        let inner = self.inner.lock();
        WorkspaceSnapshot { view: inner.view.clone(), files: inner.files.values().map(File::metadata).collect() }
    }
}

fn convert_position(lines: &[String], position: WirePosition) -> Position {
    let line = (position.line as usize).min(lines.len().saturating_sub(1));
    let character = text::char_index_to_rune(&lines[line], position.character as usize);
    Position::new(line, character)
}

fn convert_range(lines: &[String], range: WireRange) -> SelectionRange {
    SelectionRange { start: convert_position(lines, range.start), end: convert_position(lines, range.end) }
}

fn clamp_position(lines: &[String], line: usize, character: usize) -> Position {
    let clamped_line = line.min(lines.len().saturating_sub(1));
    let clamped_char = character.min(lines[clamped_line].chars().count());
    Position::new(clamped_line, clamped_char)
}

/// Cursor-follow derivation for `ReplaceText`: the first line where `prev`
/// and `new` differ, column = the shared prefix length; or the boundary line
/// if one is a prefix of the other; `None` if the contents are identical.
fn derive_cursor_after_replace(prev: &[String], new: &[String]) -> Option<Position> {
    if prev == new {
        return None;
    }

    let shorter = prev.len().min(new.len());
    for i in 0..shorter {
        if prev[i] != new[i] {
            return Some(clamp_position(new, i, text::lcp(&prev[i], &new[i])));
        }
    }
    Some(clamp_position(new, new.len(), 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: u32, character: u32) -> WirePosition {
        WirePosition { line, character }
    }

    fn range(sl: u32, sc: u32, el: u32, ec: u32) -> WireRange {
        WireRange { start: pos(sl, sc), end: pos(el, ec) }
    }

    #[test]
    fn open_file_assigns_monotonic_ids_and_sets_initial_view() {
        let ws = WorkspaceState::new();
        let id_a = ws.open_file("a.txt", "hello\nworld", "txt", true);
        let id_b = ws.open_file("b.txt", "x", "txt", false);
        assert_eq!(id_a, 0);
        assert_eq!(id_b, 1);

        let view = ws.get_view().expect("view set on first open");
        assert_eq!(view.file_id, 0);
        assert_eq!(view.cursors[0].position, Position::new(0, 0));
    }

    #[test]
    fn open_and_edit_scenario() {
        let ws = WorkspaceState::new();
        let events = std::sync::Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        ws.bus().subscribe(move |e| events_clone.lock().push(format!("{e:?}")));

        let id = ws.open_file("a.txt", "hello\nworld", "txt", true);
        assert_eq!(id, 0);

        let changes = [RangedChange { range: range(0, 5, 0, 5), text: ", there".to_string() }];
        ws.replace_text_ranges("a.txt", &changes, true);

        let file = ws.get_file("a.txt").expect("file open");
        assert_eq!(file.lines, vec!["hello, there", "world"]);

        let view = ws.get_view().expect("view set");
        assert_eq!(view.cursors[0].position, Position::new(0, 12));
    }

    #[test]
    fn close_unknown_file_is_a_no_op() {
        let ws = WorkspaceState::new();
        ws.close_file("nope.txt");
        assert!(ws.get_files().is_empty());
    }

    #[test]
    fn utf16_surrogate_cursor_move_stores_rune_offset() {
        let ws = WorkspaceState::new();
        ws.open_file("e.txt", "A\u{1F600}B", "txt", true);

        ws.cursor_move("e.txt", &[WireCursor { position: pos(0, 3), range: None }]);

        let view = ws.get_view().expect("view set");
        assert_eq!(view.cursors[0].position, Position::new(0, 2));
    }

    #[test]
    fn clear_removes_every_file_and_the_view() {
        let ws = WorkspaceState::new();
        ws.open_file("a.txt", "x", "txt", true);
        ws.clear();
        assert!(ws.get_files().is_empty());
        assert!(ws.get_view().is_none());
    }

    #[test]
    fn get_files_never_carries_line_contents() {
        let ws = WorkspaceState::new();
        ws.open_file("a.txt", "one\ntwo\nthree", "txt", true);
        let metas = ws.get_files();
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].filename, "a.txt");
    }
}
