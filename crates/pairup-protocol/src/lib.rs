//! JSON-RPC protocol types, error handling, and capabilities for pairup.
//!
//! This crate isolates wire-level protocol types from the workspace engine
//! and the transport layer so they can be shared across the editor-facing
//! LSP front-end and the observer-facing notification stream.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod capabilities;
mod errors;
mod jsonrpc;
pub mod methods;

pub use errors::*;
pub use jsonrpc::*;
