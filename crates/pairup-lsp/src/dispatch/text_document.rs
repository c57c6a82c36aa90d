//! `textDocument/*` synchronization handlers.

use serde::Deserialize;
use serde_json::Value;

use lsp_types::{Position, Range};
use pairup_engine::workspace::WireCursor;
use pairup_protocol::{JsonRpcError, errors};
use pairup_uri::uri_to_filename;

use crate::server::LspServer;

#[derive(Debug, Deserialize)]
struct TextDocumentIdentifier {
    uri: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextDocumentItem {
    uri: String,
    language_id: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct DidOpenParams {
    #[serde(rename = "textDocument")]
    text_document: TextDocumentItem,
}

#[derive(Debug, Deserialize)]
struct ContentChange {
    #[serde(default)]
    range: Option<Range>,
    text: String,
}

#[derive(Debug, Deserialize)]
struct DidChangeParams {
    #[serde(rename = "textDocument")]
    text_document: TextDocumentIdentifier,
    #[serde(rename = "contentChanges")]
    content_changes: Vec<ContentChange>,
}

#[derive(Debug, Deserialize)]
struct DidCloseParams {
    #[serde(rename = "textDocument")]
    text_document: TextDocumentIdentifier,
}

#[derive(Debug, Deserialize)]
struct HoverParams {
    #[serde(rename = "textDocument")]
    text_document: TextDocumentIdentifier,
    position: Position,
}

fn filename_from_uri(uri: &str) -> Result<String, JsonRpcError> {
    uri_to_filename(uri).ok_or_else(|| errors::invalid_params(format!("not a file:// URI: {uri}")))
}

impl LspServer {
    pub(super) fn handle_did_open_dispatch(
        &mut self,
        params: Option<Value>,
    ) -> Result<Option<Value>, JsonRpcError> {
        let params = params.ok_or_else(|| errors::invalid_params("missing params"))?;
        let params: DidOpenParams =
            serde_json::from_value(params).map_err(errors::invalid_params)?;
        let filename = filename_from_uri(&params.text_document.uri)?;

        self.workspace.open_file(
            &filename,
            &params.text_document.text,
            &params.text_document.language_id,
            !self.client_sends_cursor,
        );
        Ok(None)
    }

    pub(super) fn handle_did_change_dispatch(
        &mut self,
        params: Option<Value>,
    ) -> Result<Option<Value>, JsonRpcError> {
        let params = params.ok_or_else(|| errors::invalid_params("missing params"))?;
        let params: DidChangeParams =
            serde_json::from_value(params).map_err(errors::invalid_params)?;
        let filename = filename_from_uri(&params.text_document.uri)?;

        // The first whole-document (nil-range) change in the batch short-circuits
        // the handler: it's routed to the debounced replace path and every later
        // change in the same batch is dropped, matching how editors only ever
        // send one kind of change per didChange call in practice.
        for change in &params.content_changes {
            if change.range.is_none() {
                self.debounce_replace(&filename, &change.text);
                return Ok(None);
            }
        }

        let ranged: Vec<pairup_engine::RangedChange> = params
            .content_changes
            .into_iter()
            .filter_map(|c| c.range.map(|range| pairup_engine::RangedChange { range, text: c.text }))
            .collect();

        self.workspace.replace_text_ranges(&filename, &ranged, !self.client_sends_cursor);
        Ok(None)
    }

    pub(super) fn handle_did_close_dispatch(
        &mut self,
        params: Option<Value>,
    ) -> Result<Option<Value>, JsonRpcError> {
        let params = params.ok_or_else(|| errors::invalid_params("missing params"))?;
        let params: DidCloseParams =
            serde_json::from_value(params).map_err(errors::invalid_params)?;
        let filename = filename_from_uri(&params.text_document.uri)?;

        self.workspace.close_file(&filename);
        Ok(None)
    }

    pub(super) fn handle_hover_dispatch(
        &mut self,
        params: Option<Value>,
    ) -> Result<Option<Value>, JsonRpcError> {
        let params = params.ok_or_else(|| errors::invalid_params("missing params"))?;
        let params: HoverParams = serde_json::from_value(params).map_err(errors::invalid_params)?;

        if !self.client_sends_cursor {
            let filename = filename_from_uri(&params.text_document.uri)?;
            self.workspace.cursor_move(
                &filename,
                &[WireCursor { position: params.position, range: None }],
            );
        }

        Ok(Some(Value::Null))
    }
}
