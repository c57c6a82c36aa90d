//! Capability negotiation for the `initialize` handshake.
//!
//! This retires the original's reflective traversal of
//! `capabilities.experimental` in favor of a nominal, deserializable field:
//! [`ExperimentalClientCapabilities`] only has to know about one boolean.

use serde::{Deserialize, Serialize};

/// The subset of `InitializeParams.capabilities` this server reads.
///
/// Everything else in the client's capability bag is accepted and ignored —
/// the engine doesn't gate behavior on completion/diagnostics/etc. support.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientCapabilities {
    /// Experimental capability bag.
    #[serde(default)]
    pub experimental: Option<ExperimentalClientCapabilities>,
}

impl ClientCapabilities {
    /// Whether the client declared it will send `experimental/cursor` itself,
    /// rather than relying on the hover-as-cursor fallback.
    pub fn sends_cursor_updates(&self) -> bool {
        self.experimental.as_ref().is_some_and(|e| e.cursor.position)
    }
}

/// `capabilities.experimental` as sent by cursor-aware clients.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperimentalClientCapabilities {
    /// Cursor-related experimental capabilities.
    #[serde(default)]
    pub cursor: CursorClientCapabilities,
}

/// `capabilities.experimental.cursor`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CursorClientCapabilities {
    /// `true` if the client will send `experimental/cursor` notifications
    /// on every caret/selection change, instead of relying on hover.
    #[serde(default)]
    pub position: bool,
}

/// Server capabilities this server advertises back in `InitializeResult`.
///
/// `text_document_sync` is always incremental; `hover_provider` is
/// the inverse of [`ClientCapabilities::sends_cursor_updates`] — hover is
/// only needed to synthesize cursor moves when the client won't send them
/// itself.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCapabilities {
    /// Always `TextDocumentSyncKind::INCREMENTAL` (2).
    pub text_document_sync: u8,
    /// Mirrors `!sends_cursor_updates`.
    pub hover_provider: bool,
}

impl ServerCapabilities {
    /// Build the capabilities to advertise given whether the client already
    /// sends explicit cursor updates.
    pub fn negotiate(client_sends_cursor: bool) -> Self {
        Self { text_document_sync: 2, hover_provider: !client_sends_cursor }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_cursor_capable_client() {
        let caps: ClientCapabilities = serde_json::from_value(serde_json::json!({
            "experimental": { "cursor": { "position": true } }
        }))
        .unwrap();
        assert!(caps.sends_cursor_updates());
    }

    #[test]
    fn defaults_to_no_cursor_support() {
        let caps: ClientCapabilities = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(!caps.sends_cursor_updates());
    }

    #[test]
    fn negotiates_hover_provider_inverse_of_cursor_support() {
        assert!(!ServerCapabilities::negotiate(true).hover_provider);
        assert!(ServerCapabilities::negotiate(false).hover_provider);
    }
}
