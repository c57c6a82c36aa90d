//! `initialize`/`initialized`/`shutdown`/`exit` handlers.

use serde::Deserialize;
use serde_json::{Value, json};

use pairup_protocol::capabilities::{ClientCapabilities, ServerCapabilities};
use pairup_protocol::{JsonRpcError, errors};

use crate::server::LspServer;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InitializeParams {
    capabilities: ClientCapabilities,
}

impl LspServer {
    pub(super) fn handle_initialize_dispatch(
        &mut self,
        params: Option<Value>,
    ) -> Result<Option<Value>, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(value) => serde_json::from_value(value).map_err(errors::invalid_params)?,
            None => InitializeParams::default(),
        };

        self.client_sends_cursor = params.capabilities.sends_cursor_updates();
        let capabilities = ServerCapabilities::negotiate(self.client_sends_cursor);

        Ok(Some(json!({ "capabilities": capabilities })))
    }

    pub(super) fn handle_initialized_dispatch(&mut self) -> Result<Option<Value>, JsonRpcError> {
        self.initialized = true;
        self.flush_pending_notifications();
        Ok(None)
    }

    pub(super) fn handle_shutdown_dispatch(&mut self) -> Result<Option<Value>, JsonRpcError> {
        self.shutdown_received = true;
        Ok(Some(Value::Null))
    }

    pub(super) fn handle_exit_dispatch(&mut self) -> Result<Option<Value>, JsonRpcError> {
        let exit_code = if self.shutdown_received { 0 } else { 1 };
        tracing::info!(exit_code, "exiting on `exit` notification");
        std::process::exit(exit_code);
    }
}
