//! Message framing for the LSP Base Protocol.
//!
//! Implements Content-Length based message framing, used on the editor-facing
//! stdio transport. The WebSocket transport frames messages differently (see
//! `pairup-wire`) but both sides speak the same JSON-RPC payloads.

use pairup_protocol::{JsonRpcRequest, JsonRpcResponse};
use std::collections::HashMap;
use std::io::{self, BufRead, Read, Write};

/// Read an LSP message from a buffered reader.
///
/// Returns `Ok(None)` on EOF or a malformed frame (recoverable — the caller
/// should keep reading). Returns `Err` only on I/O errors.
pub fn read_message<R: BufRead>(reader: &mut R) -> io::Result<Option<JsonRpcRequest>> {
    let mut headers = HashMap::new();

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let line = line.trim_end();
        if line.is_empty() {
            break;
        }

        if let Some((key, value)) = line.split_once(": ") {
            headers.insert(key.to_string(), value.to_string());
        }
    }

    let Some(content_length) = headers.get("Content-Length") else {
        return Ok(None);
    };
    let Ok(length) = content_length.parse::<usize>() else {
        return Ok(None);
    };

    let mut content = vec![0u8; length];
    let mut bytes_read = 0;
    while bytes_read < length {
        match reader.read(&mut content[bytes_read..])? {
            0 => return Ok(None),
            n => bytes_read += n,
        }
    }

    match serde_json::from_slice(&content) {
        Ok(request) => Ok(Some(request)),
        Err(err) => {
            let content_str = String::from_utf8_lossy(&content);
            if content_str.len() > 100 {
                tracing::warn!(%err, frame = &content_str[..100], "malformed frame, truncated");
            } else {
                tracing::warn!(%err, frame = %content_str, "malformed frame");
            }
            Ok(None)
        }
    }
}

/// Write an LSP response to a writer with proper framing.
pub fn write_message<W: Write>(writer: &mut W, response: &JsonRpcResponse) -> io::Result<()> {
    let content = serde_json::to_string(response)?;
    write!(writer, "Content-Length: {}\r\n\r\n{}", content.len(), content)?;
    writer.flush()
}

/// Write a fire-and-forget notification to a writer with proper framing.
pub fn write_notification<W: Write>(
    writer: &mut W,
    method: &str,
    params: serde_json::Value,
) -> io::Result<()> {
    let notification = pairup_protocol::JsonRpcNotification::new(method, params);
    let content = serde_json::to_string(&notification)?;
    write!(writer, "Content-Length: {}\r\n\r\n{}", content.len(), content)?;
    writer.flush()
}

/// Log an outgoing response at debug level.
pub fn log_response(response: &JsonRpcResponse) {
    if let Ok(content) = serde_json::to_string(response) {
        tracing::debug!(
            id = ?response.id,
            has_result = response.result.is_some(),
            has_error = response.error.is_some(),
            len = content.len(),
            "tx",
        );
    }
}
