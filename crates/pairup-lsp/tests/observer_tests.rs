//! Observer adapter end-to-end: auth, initial snapshot, event mirroring,
//! and `getText`, driven over an in-memory duplex standing in for a real
//! WebSocket connection.

use std::sync::Arc;

use pairup_engine::WorkspaceState;
use pairup_lsp::observer;
use serde_json::{Value, json};
use tokio_tungstenite::tungstenite::Message;

async fn connected_pair() -> (
    tokio_tungstenite::WebSocketStream<tokio::io::DuplexStream>,
    tokio_tungstenite::WebSocketStream<tokio::io::DuplexStream>,
) {
    let (client_io, server_io) = tokio::io::duplex(64 * 1024);
    let server = tokio::spawn(tokio_tungstenite::accept_async(server_io));
    let (client, _) = tokio_tungstenite::client_async("ws://localhost/", client_io)
        .await
        .expect("client handshake succeeds");
    let server = server.await.expect("join").expect("server handshake succeeds");
    (client, server)
}

// Observer frames are length-prefixed binary, not plain WebSocket text
// frames — see pairup_wire::frame.

async fn send_json(socket: &mut tokio_tungstenite::WebSocketStream<tokio::io::DuplexStream>, value: &Value) {
    use futures_util::SinkExt;
    let frame = pairup_wire::encode(value).expect("value serializes");
    socket.send(frame).await.expect("send");
}

async fn recv_json(socket: &mut tokio_tungstenite::WebSocketStream<tokio::io::DuplexStream>) -> Value {
    use futures_util::StreamExt;
    loop {
        let message = socket.next().await.expect("socket open").expect("no transport error");
        if let Some(value) = pairup_wire::decode::<Value>(&message).expect("valid frame") {
            return value;
        }
        if matches!(message, Message::Close(_)) {
            panic!("socket closed before expected message arrived");
        }
    }
}

#[tokio::test]
async fn unauthenticated_observer_is_sent_a_snapshot_after_auth() {
    let workspace = Arc::new(WorkspaceState::new());
    workspace.open_file("/tmp/a.pl", "my $x = 1;\n", "perl", true);

    let (mut client, server) = connected_pair().await;
    let serve_workspace = Arc::clone(&workspace);
    let serving = tokio::spawn(async move { observer::serve(server, serve_workspace, None).await });

    send_json(&mut client, &json!({ "jsonrpc": "2.0", "id": 1, "method": "auth", "params": { "token": "anything" } })).await;
    let auth_response = recv_json(&mut client).await;
    assert_eq!(auth_response["result"], Value::Null);

    let snapshot = recv_json(&mut client).await;
    assert_eq!(snapshot["method"], "initialize");
    assert_eq!(snapshot["params"]["files"][0]["filename"], "/tmp/a.pl");
    assert!(
        snapshot["params"]["files"][0].get("lines").is_none(),
        "the initial snapshot lists file metadata only, not line contents"
    );

    send_json(&mut client, &json!({ "jsonrpc": "2.0", "id": 2, "method": "getText", "params": { "filename": "/tmp/a.pl" } })).await;
    let get_text_response = recv_json(&mut client).await;
    assert_eq!(get_text_response["result"]["lines"], json!(["my $x = 1;", ""]));

    drop(client);
    let _ = serving.await;
}

#[tokio::test]
async fn wrong_password_is_rejected_and_connection_stays_open_for_a_retry() {
    let workspace = Arc::new(WorkspaceState::new());
    let hash = {
        use argon2::password_hash::SaltString;
        use argon2::{Argon2, PasswordHasher};
        let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
        Argon2::default().hash_password(b"letmein", &salt).unwrap().to_string()
    };

    let (mut client, server) = connected_pair().await;
    let serve_workspace = Arc::clone(&workspace);
    let serving = tokio::spawn(async move { observer::serve(server, serve_workspace, Some(hash)).await });

    send_json(&mut client, &json!({ "jsonrpc": "2.0", "id": 1, "method": "auth", "params": { "token": "wrong" } })).await;
    let rejected = recv_json(&mut client).await;
    assert_eq!(rejected["error"]["code"], 401);

    send_json(&mut client, &json!({ "jsonrpc": "2.0", "id": 2, "method": "auth", "params": { "token": "letmein" } })).await;
    let accepted = recv_json(&mut client).await;
    assert_eq!(accepted["result"], Value::Null);

    drop(client);
    let _ = serving.await;
}
