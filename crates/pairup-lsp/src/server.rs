//! The LSP front-end: owns the workspace, the stdio transport, and every
//! piece of per-connection state an editor session carries.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use pairup_engine::debounce::{Debouncer, TextChange};
use pairup_engine::workspace::WorkspaceState;
use pairup_protocol::{JsonRpcRequest, JsonRpcResponse, errors};
use pairup_transport::{log_response, read_message, write_message, write_notification};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::forward::ForwardHandle;
use crate::peer::{PeerConnector, UnconfiguredPeerConnector};

/// The collaborative LSP server: one stdio connection to a single editor.
pub struct LspServer {
    pub(crate) workspace: Arc<WorkspaceState>,
    pub(crate) client_sends_cursor: bool,
    pub(crate) initialized: bool,
    pub(crate) shutdown_received: bool,
    pending_notifications: Vec<(String, Value)>,
    debouncer: Debouncer,
    pub(crate) forward: Option<ForwardHandle>,
    pub(crate) peer: Box<dyn PeerConnector>,
    output: Mutex<Box<dyn Write + Send>>,
    pub(crate) log_rpc: bool,
}

impl LspServer {
    /// Build a server bound to stdout, with the given relay-forwarding
    /// configuration. Must run inside a Tokio runtime — the debouncer spawns
    /// its background task on construction.
    pub fn new(config: &Config) -> Self {
        let workspace = Arc::new(WorkspaceState::new());
        let debounced_workspace = Arc::clone(&workspace);

        Self {
            workspace,
            client_sends_cursor: false,
            initialized: false,
            shutdown_received: false,
            pending_notifications: Vec::new(),
            debouncer: Debouncer::with_default_interval(move |change: TextChange| {
                debounced_workspace.replace_text(&change.filename, &change.text, true);
            }),
            forward: config.relay.as_ref().map(|relay| crate::forward::spawn(relay.url.clone())),
            peer: Box::new(UnconfiguredPeerConnector),
            output: Mutex::new(Box::new(io::stdout())),
            log_rpc: config.log_level >= 5,
        }
    }

    /// Like [`Self::new`], but writing responses and notifications to
    /// `output` instead of stdout. Exists for tests that need to inspect
    /// what the server sends without a real editor on the other end of
    /// stdio.
    pub fn with_output(config: &Config, output: Box<dyn Write + Send>) -> Self {
        Self { output: Mutex::new(output), ..Self::new(config) }
    }

    /// The workspace this server mutates.
    pub fn workspace(&self) -> &WorkspaceState {
        &self.workspace
    }

    /// Push a full-document replacement onto the debounced path.
    pub(crate) fn debounce_replace(&self, filename: &str, text: &str) {
        self.debouncer.push(TextChange { filename: filename.to_string(), text: text.to_string() });
    }

    /// Send a notification to the editor, or queue it if the client hasn't
    /// sent `initialized` yet.
    pub(crate) fn notify(&mut self, method: &str, params: Value) {
        if !self.initialized {
            self.pending_notifications.push((method.to_string(), params));
            return;
        }
        self.send_notification(method, params);
    }

    fn send_notification(&self, method: &str, params: Value) {
        let mut output = self.output.lock();
        if let Err(err) = write_notification(&mut *output, method, params) {
            warn!(%err, method, "failed to write notification");
        }
    }

    /// Flush every notification queued before `initialized` arrived.
    pub(crate) fn flush_pending_notifications(&mut self) {
        let pending = std::mem::take(&mut self.pending_notifications);
        for (method, params) in pending {
            self.send_notification(&method, params);
        }
    }

    /// Handle one JSON-RPC message, isolating any handler panic so a single
    /// faulty request never brings down the connection.
    pub fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id.clone();
        let method = request.method.clone();

        if let Some(forward) = &self.forward {
            forward.forward(&request.method, request.params.clone().unwrap_or(Value::Null));
        }

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            crate::dispatch::dispatch(self, &method, request.params)
        }));

        let result = match outcome {
            Ok(result) => result,
            Err(_) => {
                error!(method, "handler panicked, isolating fault");
                Err(errors::internal_error(format!("handler for {method} panicked")))
            }
        };

        match result {
            Ok(None) => None,
            Ok(Some(value)) => Some(JsonRpcResponse::success(id, value)),
            Err(err) => id.map(|id| JsonRpcResponse::error(Some(id), err)),
        }
    }

    /// Run the stdio loop until EOF.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut reader = stdin.lock();
        self.serve(&mut reader)
    }

    /// Serve requests from `reader`, writing responses to the configured
    /// output. Exposed separately from [`Self::run`] for testing.
    pub fn serve(&mut self, reader: &mut dyn BufRead) -> io::Result<()> {
        info!("LSP server started (stdio)");
        loop {
            match read_message(reader)? {
                Some(request) => {
                    if self.log_rpc {
                        info!(method = %request.method, "received request");
                    }
                    if let Some(response) = self.handle_request(request) {
                        if self.log_rpc {
                            log_response(&response);
                        }
                        let mut output = self.output.lock();
                        write_message(&mut *output, &response)?;
                    }
                }
                None => {
                    info!("EOF on stdin, shutting down");
                    break;
                }
            }
        }
        Ok(())
    }
}
