//! The open-file document model.

/// An open document mirrored from the editor.
///
/// `id` is assigned on open and never reused, even if a file of the same
/// name is closed and reopened — downstream observers key on `id`, not
/// `filename`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct File {
    /// Absolute path derived from the editor-supplied file URI.
    pub filename: String,
    /// Process-unique, monotonically increasing identifier.
    pub id: u32,
    /// Opaque language tag supplied by the editor.
    pub language: String,
    /// Document content, one entry per line, newlines stripped.
    ///
    /// Never empty for a tracked file — an empty document is `[""]`.
    pub lines: Vec<String>,
}

impl File {
    /// Metadata only, no line contents — what `GetFiles` and observer
    /// snapshots hand out.
    pub fn metadata(&self) -> FileMetadata {
        FileMetadata { filename: self.filename.clone(), id: self.id, language: self.language.clone() }
    }
}

/// A [`File`] without its `lines`, for listing open documents cheaply.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FileMetadata {
    /// Absolute path derived from the editor-supplied file URI.
    pub filename: String,
    /// The file's stable identifier.
    pub id: u32,
    /// Opaque language tag supplied by the editor.
    pub language: String,
}
