//! Line splitting, UTF-16 index conversion, and ranged-edit application.
//!
//! The wire protocol addresses text in UTF-16 code units (LSP's column
//! coordinate); the engine stores everything as rune (code point) offsets.
//! Every boundary between the two worlds goes through [`char_index_to_rune`]
//! or [`char_index_to_byte`].

use lsp_types::Range;

/// Split `s` on any of `\r\n`, `\r`, or `\n`. A trailing newline produces a
/// final empty line; empty input produces a single empty line.
pub fn split_lines(s: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            '\n' => lines.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    lines.push(current);
    lines
}

/// Convert a UTF-16 offset into `line` to a rune (code point) offset.
///
/// Encodes to UTF-16, truncates to `n` units, decodes back, and counts code
/// points — mirrors how an editor computes the same offset from its own
/// UTF-16 buffer.
pub fn char_index_to_rune(line: &str, utf16_offset: usize) -> usize {
    let units: Vec<u16> = line.encode_utf16().collect();
    let n = utf16_offset.min(units.len());
    String::from_utf16_lossy(&units[..n]).chars().count()
}

/// Convert a UTF-16 offset into `line` to a byte offset, for slicing.
pub fn char_index_to_byte(line: &str, utf16_offset: usize) -> usize {
    let mut utf16_count = 0;
    for (byte_idx, ch) in line.char_indices() {
        if utf16_count >= utf16_offset {
            return byte_idx;
        }
        utf16_count += ch.len_utf16();
    }
    line.len()
}

/// Largest `k` such that the first `k` bytes of `a` and `b` match, clipped to
/// `min(len(a), len(b))`.
pub fn lcp(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}

/// One incremental content change, carrying a non-nil range. A change with a
/// nil range means "replace the whole document" and never reaches this type —
/// it's routed to the debounced whole-document path instead.
#[derive(Debug, Clone)]
pub struct RangedChange {
    /// The span being replaced, in UTF-16 wire coordinates.
    pub range: Range,
    /// The replacement text (may itself contain newlines).
    pub text: String,
}

/// A line-addressed span of text as it reads after a change was applied.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChangedRange {
    /// First affected line (post-edit line numbering).
    pub start_line: usize,
    /// Last affected line (post-edit line numbering), inclusive.
    pub end_line: usize,
    /// The post-edit content of `lines[start_line..=end_line]`.
    pub text: Vec<String>,
}

/// Splice `lines[range.start.line]`'s prefix up to `range.start.character`
/// with `lines[range.end.line]`'s suffix from `range.end.character`, removing
/// the intervening lines.
pub fn delete_range(lines: &mut Vec<String>, range: &Range) {
    let start_line = range.start.line as usize;
    let end_line = range.end.line as usize;
    let start_byte = char_index_to_byte(&lines[start_line], range.start.character as usize);
    let end_byte = char_index_to_byte(&lines[end_line], range.end.character as usize);

    let merged = format!("{}{}", &lines[start_line][..start_byte], &lines[end_line][end_byte..]);
    lines.splice(start_line..=end_line, std::iter::once(merged));
}

/// Sort `changes` into reverse document order (start line, then start
/// character, both descending) — the order [`apply_ranged_changes`] applies
/// them in.
pub fn sort_reverse_document_order(changes: &[RangedChange]) -> Vec<&RangedChange> {
    let mut sorted: Vec<&RangedChange> = changes.iter().collect();
    sorted.sort_by(|a, b| {
        b.range.start.line.cmp(&a.range.start.line).then(b.range.start.character.cmp(&a.range.start.character))
    });
    sorted
}

/// Apply a batch of ranged changes to `lines`, mutating in place.
///
/// Changes are sorted into reverse document order first so that applying one
/// edit never invalidates the positions recorded in another. Returns one
/// [`ChangedRange`] per change, in the order actually applied.
pub fn apply_ranged_changes(lines: &mut Vec<String>, changes: &[RangedChange]) -> Vec<ChangedRange> {
    sort_reverse_document_order(changes).into_iter().map(|change| apply_one(lines, change)).collect()
}

/// Where the caret lands immediately after `change` is applied, given the
/// lines as they stood just before this specific change (not necessarily the
/// whole batch — reverse-order application means a change never disturbs the
/// row range of another change positioned below it).
///
/// Returns `(line, column)` in rune offsets, pre-clamp.
pub fn insertion_end(lines_before: &[String], change: &RangedChange) -> (usize, usize) {
    let start_line = change.range.start.line as usize;
    let start_byte = char_index_to_byte(&lines_before[start_line], change.range.start.character as usize);
    let prefix_len = lines_before[start_line][..start_byte].chars().count();

    if change.text.is_empty() {
        return (start_line, prefix_len);
    }

    let raw_lines = split_lines(&change.text);
    if raw_lines.len() == 1 {
        (start_line, prefix_len + raw_lines[0].chars().count())
    } else {
        let end_line = start_line + raw_lines.len() - 1;
        (end_line, raw_lines.last().map_or(0, |l| l.chars().count()))
    }
}

fn apply_one(lines: &mut Vec<String>, change: &RangedChange) -> ChangedRange {
    let start_line = change.range.start.line as usize;

    if change.text.is_empty() {
        delete_range(lines, &change.range);
        return ChangedRange { start_line, end_line: start_line, text: vec![lines[start_line].clone()] };
    }

    let end_line = change.range.end.line as usize;
    let mut replacement = split_lines(&change.text);

    let start_byte = char_index_to_byte(&lines[start_line], change.range.start.character as usize);
    let end_byte = char_index_to_byte(&lines[end_line], change.range.end.character as usize);
    let prefix = lines[start_line][..start_byte].to_string();
    let suffix = lines[end_line][end_byte..].to_string();

    if let Some(first) = replacement.first_mut() {
        *first = format!("{prefix}{first}");
    }
    if let Some(last) = replacement.last_mut() {
        *last = format!("{last}{suffix}");
    }

    let replacement_len = replacement.len();
    lines.splice(start_line..=end_line, replacement);

    let new_end_line = start_line + replacement_len - 1;
    ChangedRange { start_line, end_line: new_end_line, text: lines[start_line..=new_end_line].to_vec() }
}
