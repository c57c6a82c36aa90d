//! `textDocument/*` dispatch tests, including the didChange batch
//! short-circuit behavior: the first whole-document change in a batch wins
//! and any later change in the same notification is dropped.

use pairup_lsp::{Config, LspServer};
use pairup_protocol::JsonRpcRequest;
use serde_json::{Value, json};
use std::{thread, time::Duration};

fn request(id: Option<Value>, method: &str, params: Option<Value>) -> JsonRpcRequest {
    JsonRpcRequest { _jsonrpc: "2.0".to_string(), id, method: method.to_string(), params }
}

fn initialized_server() -> LspServer {
    let mut server = LspServer::new(&Config::default());
    server.handle_request(request(Some(json!(0)), "initialize", Some(json!({ "capabilities": {} }))));
    server.handle_request(request(None, "initialized", Some(json!({}))));
    server
}

fn did_open(server: &mut LspServer, uri: &str, text: &str) {
    server.handle_request(request(
        None,
        "textDocument/didOpen",
        Some(json!({
            "textDocument": { "uri": uri, "languageId": "perl", "text": text }
        })),
    ));
}

#[test]
fn did_open_tracks_the_file_by_its_uri_derived_path() {
    let mut server = initialized_server();
    did_open(&mut server, "file:///tmp/pair.pl", "my $x = 1;\n");

    let file = server.workspace().get_file("/tmp/pair.pl").expect("file is tracked after didOpen");
    assert_eq!(file.lines, vec!["my $x = 1;".to_string(), String::new()]);
}

#[test]
fn did_change_with_range_applies_immediately() {
    let mut server = initialized_server();
    did_open(&mut server, "file:///tmp/pair.pl", "hello world\n");

    server.handle_request(request(
        None,
        "textDocument/didChange",
        Some(json!({
            "textDocument": { "uri": "file:///tmp/pair.pl" },
            "contentChanges": [{
                "range": { "start": { "line": 0, "character": 0 }, "end": { "line": 0, "character": 5 } },
                "text": "goodbye"
            }]
        })),
    ));

    let file = server.workspace().get_file("/tmp/pair.pl").unwrap();
    assert_eq!(file.lines[0], "goodbye world");
}

#[test]
fn did_change_without_range_is_debounced_not_immediate() {
    let mut server = initialized_server();
    did_open(&mut server, "file:///tmp/pair.pl", "hello world\n");

    server.handle_request(request(
        None,
        "textDocument/didChange",
        Some(json!({
            "textDocument": { "uri": "file:///tmp/pair.pl" },
            "contentChanges": [{ "text": "brand new contents\n" }]
        })),
    ));

    let file = server.workspace().get_file("/tmp/pair.pl").unwrap();
    assert_eq!(file.lines[0], "hello world", "debounced replace hasn't fired yet");

    thread::sleep(Duration::from_millis(350));
    let file = server.workspace().get_file("/tmp/pair.pl").unwrap();
    assert_eq!(file.lines[0], "brand new contents");
}

#[test]
fn did_change_batch_short_circuits_on_first_nil_range_change() {
    let mut server = initialized_server();
    did_open(&mut server, "file:///tmp/pair.pl", "hello world\n");

    server.handle_request(request(
        None,
        "textDocument/didChange",
        Some(json!({
            "textDocument": { "uri": "file:///tmp/pair.pl" },
            "contentChanges": [
                { "text": "whole document replace\n" },
                {
                    "range": { "start": { "line": 0, "character": 0 }, "end": { "line": 0, "character": 1 } },
                    "text": "X"
                }
            ]
        })),
    ));

    thread::sleep(Duration::from_millis(350));
    let file = server.workspace().get_file("/tmp/pair.pl").unwrap();
    assert_eq!(
        file.lines[0], "whole document replace",
        "the ranged change after the nil-range one in the same batch is dropped"
    );
}

#[test]
fn did_close_stops_tracking_the_file() {
    let mut server = initialized_server();
    did_open(&mut server, "file:///tmp/pair.pl", "hello\n");

    server.handle_request(request(
        None,
        "textDocument/didClose",
        Some(json!({ "textDocument": { "uri": "file:///tmp/pair.pl" } })),
    ));

    assert!(server.workspace().get_file("/tmp/pair.pl").is_none());
}
