//! `experimental/*` dispatch tests: explicit cursor updates and the
//! connect-to-peer handshake against the default, unconfigured connector.

use pairup_lsp::{Config, LspServer};
use pairup_protocol::JsonRpcRequest;
use serde_json::{Value, json};

fn request(id: Option<Value>, method: &str, params: Option<Value>) -> JsonRpcRequest {
    JsonRpcRequest { _jsonrpc: "2.0".to_string(), id, method: method.to_string(), params }
}

fn initialized_server() -> LspServer {
    let mut server = LspServer::new(&Config::default());
    server.handle_request(request(Some(json!(0)), "initialize", Some(json!({ "capabilities": {} }))));
    server.handle_request(request(None, "initialized", Some(json!({}))));
    server
}

#[test]
fn explicit_cursor_update_moves_the_view() {
    let mut server = initialized_server();
    server.handle_request(request(
        None,
        "textDocument/didOpen",
        Some(json!({ "textDocument": { "uri": "file:///tmp/a.pl", "languageId": "perl", "text": "x\n" } })),
    ));

    let response = server.handle_request(request(
        Some(json!(1)),
        "experimental/cursor",
        Some(json!({
            "textDocument": { "uri": "file:///tmp/a.pl" },
            "cursors": [{ "position": { "line": 0, "character": 1 } }]
        })),
    ));
    assert!(response.is_none(), "experimental/cursor is a notification");

    let view = server.workspace().get_view().expect("cursor update produces a view");
    assert_eq!(view.cursors.len(), 1);
}

#[test]
fn connect_to_peer_without_a_token_fails_with_unconfigured_connector() {
    let mut server = initialized_server();
    let response = server
        .handle_request(request(Some(json!(1)), "experimental/connectToPeer", Some(json!({}))))
        .unwrap();

    let error = response.error.expect("no peer connector is configured by default");
    assert_eq!(error.code, pairup_protocol::errors::INVALID_PARAMS);
}

#[test]
fn connect_to_peer_with_a_malformed_token_is_rejected() {
    let mut server = initialized_server();
    let response = server
        .handle_request(request(
            Some(json!(1)),
            "experimental/connectToPeer",
            Some(json!({ "token": "not-base64-json!!" })),
        ))
        .unwrap();

    assert!(response.error.is_some());
}
