//! Request dispatch and routing for the LSP server.
//!
//! One method-name match, routing every editor-facing request or
//! notification to its handler. Submodules group handlers by concern:
//!
//! - **lifecycle**: `initialize`, `initialized`, `shutdown`, `exit`
//! - **text_document**: `didOpen`/`didChange`/`didClose`/`hover`
//! - **experimental**: `experimental/cursor`, `experimental/connectToPeer`
//!
//! Unlike a general-purpose LSP server, nothing here tracks per-request
//! cancellation tokens — `$/cancelRequest` is accepted and ignored, matching
//! the concurrency model this server is built against.

mod experimental;
mod lifecycle;
mod text_document;

use serde_json::Value;

use pairup_protocol::{JsonRpcError, errors, methods};

use crate::server::LspServer;

/// Methods that require a completed `initialize`/`initialized` handshake
/// before they're routed. Lifecycle methods, `$/cancelRequest`, and unknown
/// methods are exempt — a client must be able to initialize, shut down, and
/// get a `MethodNotFound` regardless of handshake state.
const REQUIRES_INITIALIZED: &[&str] = &[
    methods::TEXT_DOCUMENT_DID_OPEN,
    methods::TEXT_DOCUMENT_DID_CHANGE,
    methods::TEXT_DOCUMENT_DID_CLOSE,
    methods::TEXT_DOCUMENT_HOVER,
    methods::EXPERIMENTAL_CURSOR,
    methods::EXPERIMENTAL_CONNECT_TO_PEER,
];

/// Route one decoded method/params pair to its handler.
pub(crate) fn dispatch(
    server: &mut LspServer,
    method: &str,
    params: Option<Value>,
) -> Result<Option<Value>, JsonRpcError> {
    if method == methods::CANCEL_REQUEST {
        return Ok(None);
    }

    if !server.initialized && REQUIRES_INITIALIZED.contains(&method) {
        return Err(errors::server_not_initialized());
    }

    match method {
        methods::INITIALIZE => server.handle_initialize_dispatch(params),
        methods::INITIALIZED => server.handle_initialized_dispatch(),
        methods::SHUTDOWN => server.handle_shutdown_dispatch(),
        methods::EXIT => server.handle_exit_dispatch(),

        methods::TEXT_DOCUMENT_DID_OPEN => server.handle_did_open_dispatch(params),
        methods::TEXT_DOCUMENT_DID_CHANGE => server.handle_did_change_dispatch(params),
        methods::TEXT_DOCUMENT_DID_CLOSE => server.handle_did_close_dispatch(params),
        methods::TEXT_DOCUMENT_HOVER => server.handle_hover_dispatch(params),

        methods::EXPERIMENTAL_CURSOR => server.handle_cursor_dispatch(params),
        methods::EXPERIMENTAL_CONNECT_TO_PEER => server.handle_connect_to_peer_dispatch(params),

        other => Err(errors::method_not_found(other)),
    }
}
