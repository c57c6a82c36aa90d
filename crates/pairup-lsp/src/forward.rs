//! Forwarding pipe to an upstream relay.
//!
//! Every inbound editor request, regardless of method, is mirrored as a
//! notification onto a single upstream relay connection. The channel
//! between the dispatcher and the forwarder is a rendezvous
//! (`sync_channel(0)`): a full channel back-pressures the editor pipeline
//! exactly as an unbuffered channel would. A write failure on the upstream
//! socket is fatal; there is no reconnect strategy, a deliberate choice
//! recorded in the project's design notes.

use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::thread;

use pairup_protocol::JsonRpcNotification;
use serde_json::Value;
use tokio_tungstenite::tungstenite::connect;
use tracing::{error, info, warn};

struct ForwardedRequest {
    method: String,
    params: Value,
}

/// A handle the dispatcher pushes every inbound editor request onto.
pub struct ForwardHandle {
    tx: SyncSender<ForwardedRequest>,
}

impl ForwardHandle {
    /// Mirror `method`/`params` onto the relay. Blocks until the forwarding
    /// thread accepts it, providing the channel's back-pressure.
    pub fn forward(&self, method: &str, params: Value) {
        let request = ForwardedRequest { method: method.to_string(), params };
        if self.tx.send(request).is_err() {
            warn!("forwarding thread is gone, dropping request");
        }
    }
}

/// Connect to `relay_url` and spawn the dedicated forwarding thread.
///
/// Returns immediately; the connection itself happens on the spawned thread
/// so that a slow or unreachable relay doesn't block startup.
pub fn spawn(relay_url: String) -> ForwardHandle {
    let (tx, rx) = sync_channel::<ForwardedRequest>(0);
    if let Err(err) =
        thread::Builder::new().name("pairup-forward".to_string()).spawn(move || run(relay_url, rx))
    {
        error!(%err, "failed to spawn relay forwarding thread");
        std::process::exit(1);
    }
    ForwardHandle { tx }
}

fn run(relay_url: String, rx: Receiver<ForwardedRequest>) {
    info!(url = %relay_url, "connecting to relay server");
    let (mut socket, _response) = match connect(&relay_url) {
        Ok(pair) => pair,
        Err(err) => {
            error!(%err, "relay connection failed");
            std::process::exit(1);
        }
    };

    while let Ok(request) = rx.recv() {
        let notification = JsonRpcNotification::new(request.method, request.params);
        let frame = match pairup_wire::encode(&notification) {
            Ok(frame) => frame,
            Err(err) => {
                error!(%err, "failed to encode forwarded request, dropping it");
                continue;
            }
        };
        if let Err(err) = socket.send(frame) {
            error!(%err, "relay write failed, terminating");
            std::process::exit(1);
        }
    }
}
