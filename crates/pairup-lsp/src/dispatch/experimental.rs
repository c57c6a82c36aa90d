//! `experimental/*` handlers: explicit cursor updates and direct peer setup.

use serde::Deserialize;
use serde_json::{Value, json};

use lsp_types::{Position, Range};
use pairup_engine::workspace::WireCursor;
use pairup_protocol::{JsonRpcError, errors};
use pairup_uri::uri_to_filename;
use pairup_wire::PeerToken;

use crate::peer::{PeerConnectError, PeerConnector};
use crate::server::LspServer;

#[derive(Debug, Deserialize)]
struct CursorEntry {
    position: Position,
    #[serde(default)]
    range: Option<Range>,
}

#[derive(Debug, Deserialize)]
struct CursorParams {
    #[serde(rename = "textDocument")]
    text_document: TextDocumentIdentifier,
    cursors: Vec<CursorEntry>,
}

#[derive(Debug, Deserialize)]
struct TextDocumentIdentifier {
    uri: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConnectToPeerParams {
    token: Option<String>,
}

impl From<PeerConnectError> for JsonRpcError {
    fn from(err: PeerConnectError) -> Self {
        errors::invalid_params(err)
    }
}

impl LspServer {
    pub(super) fn handle_cursor_dispatch(
        &mut self,
        params: Option<Value>,
    ) -> Result<Option<Value>, JsonRpcError> {
        let params = params.ok_or_else(|| errors::invalid_params("missing params"))?;
        let params: CursorParams = serde_json::from_value(params).map_err(errors::invalid_params)?;
        let filename = uri_to_filename(&params.text_document.uri)
            .ok_or_else(|| errors::invalid_params("not a file:// URI"))?;

        let cursors: Vec<WireCursor> = params
            .cursors
            .into_iter()
            .map(|c| WireCursor { position: c.position, range: c.range })
            .collect();

        self.workspace.cursor_move(&filename, &cursors);
        Ok(None)
    }

    pub(super) fn handle_connect_to_peer_dispatch(
        &mut self,
        params: Option<Value>,
    ) -> Result<Option<Value>, JsonRpcError> {
        let params: ConnectToPeerParams = match params {
            Some(value) => serde_json::from_value(value).map_err(errors::invalid_params)?,
            None => ConnectToPeerParams::default(),
        };

        let reply = match params.token {
            None => Some(self.peer.initiate()?),
            Some(token) => {
                let token = PeerToken::decode(&token).map_err(errors::invalid_params)?;
                self.peer.respond(token)?
            }
        };

        match reply {
            Some(token) => {
                let encoded = token.encode().map_err(errors::invalid_params)?;
                Ok(Some(json!({ "token": encoded })))
            }
            None => Ok(Some(Value::Null)),
        }
    }
}
