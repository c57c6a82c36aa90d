//! Direct peer-connection boundary for `experimental/connectToPeer`.
//!
//! ICE/SDP negotiation is an external collaborator's job — this module
//! only defines the seam the dispatcher calls through. A real
//! implementation plugs in a [`PeerConnector`] backed by a WebRTC stack and
//! a signal-server connection; by default the server runs with
//! [`UnconfiguredPeerConnector`], which declines every request.

use pairup_wire::PeerToken;

/// Errors from initiating or answering a peer session.
#[derive(Debug, thiserror::Error)]
pub enum PeerConnectError {
    /// No real-time transport is wired up.
    #[error("peer connections are not configured on this server")]
    NotConfigured,
    /// The transport rejected the request (ICE failure, bad offer, etc).
    #[error("peer connection failed: {0}")]
    Failed(String),
}

/// The real-time transport boundary for `experimental/connectToPeer`.
///
/// `initiate` starts a call with no counterpart yet (the editor wants a
/// share link); `respond` answers an offer or completes an answer that
/// arrived as a base64 [`PeerToken`].
pub trait PeerConnector: Send + Sync {
    /// Start a new call, returning the local offer as a token to hand to a
    /// counterpart out of band.
    fn initiate(&self) -> Result<PeerToken, PeerConnectError>;

    /// Respond to an inbound offer or complete a pending one. Returns
    /// `Some(answer)` when a reply token should be sent back to the caller,
    /// `None` when the exchange completes silently (the "answer" branch of
    /// `connectToPeer`, which replies to the caller out of band instead).
    fn respond(&self, token: PeerToken) -> Result<Option<PeerToken>, PeerConnectError>;
}

/// The default [`PeerConnector`]: declines every request. Installed when no
/// signal server or WebRTC stack is configured.
#[derive(Debug, Default)]
pub struct UnconfiguredPeerConnector;

impl PeerConnector for UnconfiguredPeerConnector {
    fn initiate(&self) -> Result<PeerToken, PeerConnectError> {
        Err(PeerConnectError::NotConfigured)
    }

    fn respond(&self, _token: PeerToken) -> Result<Option<PeerToken>, PeerConnectError> {
        Err(PeerConnectError::NotConfigured)
    }
}
