//! URI ↔ filesystem path conversion utilities.
//!
//! This crate provides consistent URI handling for the workspace state
//! engine: converting `file://` URIs to the filename string the engine
//! stores on `File::filename`, including Windows drive-letter
//! normalization and percent-decoding.
//!
//! Only `file://` URIs name an open document; everything else (`untitled:`,
//! `git:`, ...) is passed through by callers rather than tracked.
//!
//! # Examples
//!
//! ```
//! use pairup_uri::uri_to_filename;
//!
//! let filename = uri_to_filename("file:///tmp/test.txt");
//! assert_eq!(filename.as_deref(), Some("/tmp/test.txt"));
//! ```

use url::Url;

/// Convert a `file://` URI into the absolute filename the engine stores on
/// `File::filename`, independent of the host platform.
///
/// This mirrors what editors actually send: a percent-decoded URI path,
/// with a leading `/` stripped when it precedes a Windows drive letter
/// (`file:///C:/Users/x` → `C:/Users/x`). Unlike going through
/// [`Url::to_file_path`], whose drive-letter handling is gated on the
/// compile target rather than the URI's own shape, this is purely
/// string-based: an editor can send a `/C:/...` URI to a server running
/// on Linux.
///
/// Returns `None` for non-`file://` URIs.
pub fn uri_to_filename(uri: &str) -> Option<String> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    let path = url.path();
    let bytes = path.as_bytes();
    let stripped = if bytes.len() > 2
        && bytes[0] == b'/'
        && bytes[1].is_ascii_alphabetic()
        && bytes[2] == b':'
    {
        &path[1..]
    } else {
        path
    };
    Some(percent_decode_path(stripped))
}

fn percent_decode_path(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Ok(byte) = u8::from_str_radix(&s[i + 1..i + 3], 16) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_to_filename_unix() {
        assert_eq!(uri_to_filename("file:///tmp/test.txt").as_deref(), Some("/tmp/test.txt"));
    }

    #[test]
    fn test_uri_to_filename_strips_windows_drive_slash() {
        assert_eq!(
            uri_to_filename("file:///C:/Users/x/test.txt").as_deref(),
            Some("C:/Users/x/test.txt")
        );
    }

    #[test]
    fn test_uri_to_filename_percent_decodes() {
        assert_eq!(
            uri_to_filename("file:///tmp/path%20with%20spaces/f.txt").as_deref(),
            Some("/tmp/path with spaces/f.txt")
        );
    }

    #[test]
    fn test_uri_to_filename_rejects_non_file_scheme() {
        assert_eq!(uri_to_filename("untitled:Untitled-1"), None);
        assert_eq!(uri_to_filename("https://example.com/f"), None);
    }
}
