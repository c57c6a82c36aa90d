//! Collaborative pair-programming LSP backend.
//!
//! Wires the workspace state engine up to a JSON-RPC dispatcher served over
//! stdio, plus the side channels a pairing session needs: an observer
//! adapter for read-only watchers, a forwarding pipe to a relay, and a
//! direct peer connector for screen-sharing style collaborators.

pub mod config;
pub mod forward;
pub mod observer;
pub mod peer;
pub mod security;
pub mod server;

mod dispatch;

pub use config::Config;
pub use server::LspServer;
