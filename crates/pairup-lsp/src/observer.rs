//! Observer adapter: one task per connected observer.
//!
//! WebSocket upgrade is an external collaborator's job — this module takes
//! an already-established [`WebSocketStream`] and owns everything past
//! that: authentication, the initial snapshot, mirroring workspace events
//! as notifications, and answering `getText`.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use pairup_engine::{Event, WorkspaceState};
use pairup_protocol::{JsonRpcError, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, errors, methods};
use serde_json::{Value, json};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, warn};

use crate::security;

/// Errors from serving one observer connection. All are logged and end the
/// connection; none propagate to other observers or to the editor.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The socket itself failed.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    /// A frame didn't decode to valid JSON for its expected type.
    #[error("frame error: {0}")]
    Frame(#[from] pairup_wire::FrameError),
    /// A response or notification failed to serialize — indicates a bug,
    /// since our own types always serialize.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Drive one observer connection to completion.
///
/// Blocks (asynchronously) until the socket closes or a fatal error occurs;
/// callers typically `tokio::spawn` this per accepted connection.
pub async fn serve<S>(
    mut socket: WebSocketStream<S>,
    workspace: Arc<WorkspaceState>,
    password_hash: Option<String>,
) -> Result<(), ObserverError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    if !authenticate(&mut socket, password_hash.as_deref()).await? {
        return Ok(());
    }

    send_snapshot(&mut socket, &workspace).await?;

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let subscription = workspace.bus().subscribe(move |event| {
        let _ = tx.send(event.clone());
    });

    let outcome = drive(&mut socket, &workspace, &mut rx).await;
    workspace.bus().unsubscribe(subscription);
    outcome
}

/// The first inbound message must be `auth{token}`. Returns `true`
/// once authenticated, `false` if the socket closed first.
async fn authenticate<S>(
    socket: &mut WebSocketStream<S>,
    password_hash: Option<&str>,
) -> Result<bool, ObserverError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    while let Some(message) = socket.next().await {
        let message = message?;
        let Some(request) = pairup_wire::decode::<JsonRpcRequest>(&message)? else {
            continue;
        };
        if request.method != methods::AUTH {
            send_response(socket, JsonRpcResponse::error(request.id, errors::unauthorized())).await?;
            continue;
        }

        let token = request
            .params
            .as_ref()
            .and_then(|p| p.get("token"))
            .and_then(Value::as_str)
            .unwrap_or_default();

        let authorized = match password_hash {
            Some(hash) => security::verify(hash, token),
            None => true,
        };

        if !authorized {
            send_response(socket, JsonRpcResponse::error(request.id, errors::unauthorized())).await?;
            continue;
        }

        send_response(socket, JsonRpcResponse::null(request.id)).await?;
        return Ok(true);
    }
    Ok(false)
}

async fn send_snapshot<S>(socket: &mut WebSocketStream<S>, workspace: &WorkspaceState) -> Result<(), ObserverError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let snapshot = workspace.snapshot();
    let params = json!({ "view": snapshot.view, "files": snapshot.files });
    send_notification(socket, methods::OBSERVER_INITIALIZE, params).await
}

/// Mirror workspace events and answer `getText` requests until disconnect.
async fn drive<S>(
    socket: &mut WebSocketStream<S>,
    workspace: &WorkspaceState,
    rx: &mut mpsc::UnboundedReceiver<Event>,
) -> Result<(), ObserverError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else { return Ok(()) };
                let (method, params) = event_to_notification(&event);
                send_notification(socket, method, params).await?;
            }
            message = socket.next() => {
                let Some(message) = message else { return Ok(()) };
                let message = message?;
                let Some(request) = pairup_wire::decode::<JsonRpcRequest>(&message)? else { continue };
                handle_inbound(socket, workspace, request).await?;
            }
        }
    }
}

async fn handle_inbound<S>(
    socket: &mut WebSocketStream<S>,
    workspace: &WorkspaceState,
    request: JsonRpcRequest,
) -> Result<(), ObserverError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let response = match request.method.as_str() {
        methods::GET_TEXT => handle_get_text(workspace, request.params.as_ref()),
        other => Err(errors::method_not_found(other)),
    };
    let response = match response {
        Ok(value) => JsonRpcResponse::success(request.id, value),
        Err(err) => JsonRpcResponse::error(request.id, err),
    };
    send_response(socket, response).await
}

fn handle_get_text(workspace: &WorkspaceState, params: Option<&Value>) -> Result<Value, JsonRpcError> {
    let filename = params
        .and_then(|p| p.get("filename"))
        .and_then(Value::as_str)
        .ok_or_else(|| errors::invalid_params("missing `filename`"))?;
    let file = workspace.get_file(filename);
    serde_json::to_value(file).map_err(|err| errors::invalid_params(err))
}

fn event_to_notification(event: &Event) -> (&'static str, Value) {
    match event {
        Event::OpenFile { filename, id, language } => {
            (methods::OPEN_FILE, json!({ "filename": filename, "id": id, "language": language }))
        }
        Event::CloseFile { file_id } => (methods::CLOSE_FILE, json!({ "file_id": file_id })),
        Event::ReplaceText { file_id, text } => {
            (methods::TEXT_REPLACED, json!({ "file_id": file_id, "text": text }))
        }
        Event::UpdateText { file_id, changes } => {
            (methods::UPDATE_TEXT, json!({ "file_id": file_id, "changes": changes }))
        }
        Event::ChangeView { view } => (methods::UPDATE_VIEW, json!({ "view": view })),
    }
}

async fn send_notification<S>(
    socket: &mut WebSocketStream<S>,
    method: &str,
    params: Value,
) -> Result<(), ObserverError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let notification = JsonRpcNotification::new(method, params);
    debug!(method, "sending observer notification");
    let frame = pairup_wire::encode(&notification)?;
    send_frame(socket, frame).await
}

async fn send_response<S>(socket: &mut WebSocketStream<S>, response: JsonRpcResponse) -> Result<(), ObserverError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let frame = pairup_wire::encode(&response)?;
    send_frame(socket, frame).await
}

async fn send_frame<S>(socket: &mut WebSocketStream<S>, frame: Message) -> Result<(), ObserverError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    socket.send(frame).await?;
    Ok(())
}
