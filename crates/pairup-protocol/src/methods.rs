//! JSON-RPC method name constants for the editor and observer surfaces.
//!
//! This module centralizes every method identifier the dispatcher matches on,
//! so that the dispatch `match`, capability negotiation, and tests all read
//! off a single source of truth instead of string literals scattered across
//! the crate.
//!
//! # Organization
//!
//! - **Lifecycle**: `INITIALIZE`, `INITIALIZED`, `SHUTDOWN`
//! - **Text sync**: `TEXT_DOCUMENT_DID_OPEN`, `_DID_CHANGE`, `_DID_CLOSE`
//! - **Experimental**: `EXPERIMENTAL_CURSOR`, `EXPERIMENTAL_CONNECT_TO_PEER`
//! - **Observer inbound**: `AUTH`, `GET_TEXT`
//! - **Observer outbound**: `OBSERVER_INITIALIZE`, `OPEN_FILE`, `CLOSE_FILE`,
//!   `TEXT_REPLACED`, `UPDATE_TEXT`, `UPDATE_VIEW`
//!
//! # Example
//!
//! ```
//! use pairup_protocol::methods;
//!
//! fn route(method: &str) -> &'static str {
//!     match method {
//!         methods::TEXT_DOCUMENT_DID_OPEN => "open",
//!         methods::TEXT_DOCUMENT_DID_CHANGE => "change",
//!         _ => "other",
//!     }
//! }
//! assert_eq!(route(methods::TEXT_DOCUMENT_DID_OPEN), "open");
//! ```

// ============================================================================
// Lifecycle
// ============================================================================

/// Initialize request — first request from the editor to the server.
pub const INITIALIZE: &str = "initialize";

/// Initialized notification — sent once the client is ready for server pushes.
pub const INITIALIZED: &str = "initialized";

/// Shutdown request — the editor is about to disconnect.
pub const SHUTDOWN: &str = "shutdown";

/// Exit notification — terminate the connection immediately.
pub const EXIT: &str = "exit";

// ============================================================================
// Text Document Synchronization
// ============================================================================

/// Document opened notification.
pub const TEXT_DOCUMENT_DID_OPEN: &str = "textDocument/didOpen";

/// Document changed notification — carries a batch of content changes.
pub const TEXT_DOCUMENT_DID_CHANGE: &str = "textDocument/didChange";

/// Document closed notification.
pub const TEXT_DOCUMENT_DID_CLOSE: &str = "textDocument/didClose";

/// Hover request — in the legacy (no client-sent cursor) path, this also
/// synthesizes a cursor move at the hover position.
pub const TEXT_DOCUMENT_HOVER: &str = "textDocument/hover";

// ============================================================================
// Cancellation (acknowledged but never honored — see concurrency model)
// ============================================================================

/// Cancel-request notification.
pub const CANCEL_REQUEST: &str = "$/cancelRequest";

// ============================================================================
// Experimental
// ============================================================================

/// Explicit cursor/selection update from editors that opt out of hover-as-cursor.
pub const EXPERIMENTAL_CURSOR: &str = "experimental/cursor";

/// Initiate or answer a direct real-time peer session.
pub const EXPERIMENTAL_CONNECT_TO_PEER: &str = "experimental/connectToPeer";

// ============================================================================
// Observer-facing — inbound
// ============================================================================

/// First message on an observer connection: a bearer token.
pub const AUTH: &str = "auth";

/// Pull the full contents of one file on demand.
pub const GET_TEXT: &str = "getText";

// ============================================================================
// Observer-facing — outbound notifications
// ============================================================================

/// Initial snapshot sent right after a successful `auth`.
pub const OBSERVER_INITIALIZE: &str = "initialize";

/// Mirrors engine `OpenFile` events.
pub const OPEN_FILE: &str = "openFile";

/// Mirrors engine `CloseFile` events.
pub const CLOSE_FILE: &str = "closeFile";

/// Mirrors engine `ReplaceText` events.
pub const TEXT_REPLACED: &str = "textReplaced";

/// Mirrors engine `UpdateText` events.
pub const UPDATE_TEXT: &str = "updateText";

/// Mirrors engine `ChangeView` events.
pub const UPDATE_VIEW: &str = "updateView";
