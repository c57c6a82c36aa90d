//! The public change log emitted by the workspace state.

use crate::document::FileMetadata;
use crate::text::ChangedRange;
use crate::view::View;

/// One incrementally-applied span, as recorded by [`crate::text::apply_ranged_changes`].
pub type ChangeTextRange = ChangedRange;

/// A state mutation, published to every subscriber of the event bus.
///
/// Events carry value copies of their data — the mutable `lines` vector
/// backing a [`crate::document::File`] is never shared with a subscriber.
#[derive(Debug, Clone)]
pub enum Event {
    /// A file was opened.
    OpenFile {
        /// The new file's path.
        filename: String,
        /// The new file's stable id.
        id: u32,
        /// The editor-supplied language tag.
        language: String,
    },
    /// A file was closed.
    CloseFile {
        /// The id of the file that was closed.
        file_id: u32,
    },
    /// A file's entire contents were replaced.
    ReplaceText {
        /// The file that changed.
        file_id: u32,
        /// The new contents, one entry per line.
        text: Vec<String>,
    },
    /// A file was edited incrementally.
    UpdateText {
        /// The file that changed.
        file_id: u32,
        /// One entry per applied change, in application order.
        changes: Vec<ChangeTextRange>,
    },
    /// The active file or cursor/selection set changed.
    ChangeView {
        /// The new view.
        view: View,
    },
}

/// Metadata for every open file, without line contents — the observer
/// snapshot payload.
#[derive(Debug, Clone)]
pub struct WorkspaceSnapshot {
    /// The current view, if any file has ever been opened.
    pub view: Option<View>,
    /// Every currently-open file, metadata only.
    pub files: Vec<FileMetadata>,
}
