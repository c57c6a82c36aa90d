//! The base64-encoded token exchanged to set up a direct peer session.
//!
//! `SessionDescription` itself is ICE/SDP negotiation detail, out of scope
//! here — this crate only carries it as an opaque JSON value between the
//! two `experimental/connectToPeer` calls.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// `{desc, client_id?}`, base64-of-JSON encoded for transport inside a
/// JSON-RPC string parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerToken {
    /// The opaque session description offered or answered by a peer.
    pub desc: serde_json::Value,
    /// The identifier of the client this token is directed at, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// Errors decoding a peer token.
#[derive(Debug, thiserror::Error)]
pub enum PeerTokenError {
    /// The token wasn't valid base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded bytes weren't valid JSON for [`PeerToken`].
    #[error("invalid token JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl PeerToken {
    /// Base64-encode this token for inclusion in a request parameter.
    pub fn encode(&self) -> serde_json::Result<String> {
        let json = serde_json::to_vec(self)?;
        Ok(STANDARD.encode(json))
    }

    /// Decode a base64 peer token.
    pub fn decode(token: &str) -> Result<Self, PeerTokenError> {
        let bytes = STANDARD.decode(token)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_base64() {
        let token = PeerToken {
            desc: serde_json::json!({"type": "offer", "sdp": "v=0..."}),
            client_id: Some("client-1".to_string()),
        };
        let encoded = token.encode().expect("encode");
        let decoded = PeerToken::decode(&encoded).expect("decode");
        assert_eq!(decoded.client_id.as_deref(), Some("client-1"));
        assert_eq!(decoded.desc, token.desc);
    }

    #[test]
    fn client_id_is_optional() {
        let token = PeerToken { desc: serde_json::json!({"type": "answer"}), client_id: None };
        let encoded = token.encode().expect("encode");
        let decoded = PeerToken::decode(&encoded).expect("decode");
        assert!(decoded.client_id.is_none());
    }

    #[test]
    fn rejects_garbage_base64() {
        assert!(matches!(PeerToken::decode("not-base64!!"), Err(PeerTokenError::Base64(_))));
    }
}
