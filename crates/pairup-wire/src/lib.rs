//! Wire-level concerns for pairup's observer and relay connections.
//!
//! This crate covers the parts of the external-collaborator transports
//! that aren't HTTP routing, WebSocket upgrade, or ICE/SDP negotiation
//! themselves:
//!
//! - [`frame`] — length-prefixed JSON inside a single binary WebSocket frame
//! - [`share_url`] — building the `http(s)://` URL a human pastes into a browser
//! - [`peer_token`] — the base64 token exchanged to set up a direct peer session

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod frame;
pub mod peer_token;
pub mod share_url;

pub use frame::{FrameError, decode, encode};
pub use peer_token::{PeerToken, PeerTokenError};
pub use share_url::{NotAWebSocketUrl, share_url};
