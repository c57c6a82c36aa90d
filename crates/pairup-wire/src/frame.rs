//! Message framing for observer and relay connections.
//!
//! Each JSON-RPC message is sent as a single binary WebSocket frame whose
//! payload is a 4-byte big-endian length prefix followed by the JSON body —
//! there is no `Content-Length` header here, unlike the stdio transport.
//! Partial frames are not supported: a frame must contain exactly one
//! complete message.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_tungstenite::tungstenite::Message;

/// Errors from decoding a length-prefixed frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The frame was not a binary WebSocket frame.
    #[error("expected a binary frame, got {0:?}")]
    NotBinary(&'static str),
    /// The frame was too short to contain a length prefix.
    #[error("frame shorter than the 4-byte length prefix")]
    Truncated,
    /// The declared length didn't match the remaining payload.
    #[error("length prefix says {declared} bytes, payload has {actual}")]
    LengthMismatch {
        /// Length the prefix declared.
        declared: usize,
        /// Bytes actually remaining after the prefix.
        actual: usize,
    },
    /// The payload wasn't valid JSON for the requested type.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode `value` as a length-prefixed JSON binary WebSocket frame.
pub fn encode<T: Serialize>(value: &T) -> serde_json::Result<Message> {
    let json = serde_json::to_vec(value)?;
    let mut framed = Vec::with_capacity(4 + json.len());
    framed.extend_from_slice(&(json.len() as u32).to_be_bytes());
    framed.extend_from_slice(&json);
    Ok(Message::Binary(framed))
}

/// Decode a length-prefixed JSON binary WebSocket frame.
///
/// Returns `Ok(None)` for non-binary frames (ping/pong/close/text) — callers
/// should simply ignore those and keep reading.
pub fn decode<T: DeserializeOwned>(message: &Message) -> Result<Option<T>, FrameError> {
    let Message::Binary(bytes) = message else {
        return Ok(None);
    };

    if bytes.len() < 4 {
        return Err(FrameError::Truncated);
    }
    let declared = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
    let payload = &bytes[4..];
    if declared != payload.len() {
        return Err(FrameError::LengthMismatch { declared, actual: payload.len() });
    }

    Ok(Some(serde_json::from_slice(payload)?))
}
