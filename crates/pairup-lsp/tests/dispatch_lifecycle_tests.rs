//! `initialize`/`initialized`/`shutdown`/`exit` wiring through the dispatcher.

use pairup_lsp::{Config, LspServer};
use pairup_protocol::JsonRpcRequest;
use serde_json::{Value, json};

fn request(id: Option<Value>, method: &str, params: Option<Value>) -> JsonRpcRequest {
    JsonRpcRequest { _jsonrpc: "2.0".to_string(), id, method: method.to_string(), params }
}

#[test]
fn initialize_advertises_hover_when_client_has_no_cursor_capability() {
    let mut server = LspServer::new(&Config::default());

    let response = server
        .handle_request(request(Some(json!(1)), "initialize", Some(json!({ "capabilities": {} }))))
        .expect("initialize returns a response");

    let capabilities = response.result.expect("initialize result carries capabilities");
    assert_eq!(capabilities["capabilities"]["hoverProvider"], json!(true));
    assert_eq!(capabilities["capabilities"]["textDocumentSync"], json!(2));
}

#[test]
fn initialize_withholds_hover_when_client_sends_cursor_updates() {
    let mut server = LspServer::new(&Config::default());

    let response = server
        .handle_request(request(
            Some(json!(1)),
            "initialize",
            Some(json!({ "capabilities": { "experimental": { "cursor": { "position": true } } } })),
        ))
        .expect("initialize returns a response");

    let capabilities = response.result.expect("initialize result carries capabilities");
    assert_eq!(capabilities["capabilities"]["hoverProvider"], json!(false));
}

#[test]
fn initialized_is_a_notification_with_no_response() {
    let mut server = LspServer::new(&Config::default());
    server.handle_request(request(Some(json!(1)), "initialize", Some(json!({}))));

    let response = server.handle_request(request(None, "initialized", None));
    assert!(response.is_none(), "notifications never produce a response");
}

#[test]
fn shutdown_returns_null_and_unknown_methods_error() {
    let mut server = LspServer::new(&Config::default());

    let response = server.handle_request(request(Some(json!(2)), "shutdown", None)).unwrap();
    assert_eq!(response.result, Some(Value::Null));

    let response = server.handle_request(request(Some(json!(3)), "not/a/real/method", None)).unwrap();
    let error = response.error.expect("unknown method is an error response");
    assert_eq!(error.code, pairup_protocol::errors::METHOD_NOT_FOUND);
}

#[test]
fn cancel_request_is_silently_accepted() {
    let mut server = LspServer::new(&Config::default());
    let response = server.handle_request(request(Some(json!(4)), "$/cancelRequest", Some(json!({ "id": 1 }))));
    assert!(response.is_none(), "cancellation is accepted and short-circuited, never answered");
}
