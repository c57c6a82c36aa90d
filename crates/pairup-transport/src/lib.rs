//! Stdio transport for pairup's editor-facing JSON-RPC connection.
//!
//! The LSP Base Protocol frames each message with a `Content-Length` header
//! over a byte stream (stdin/stdout in the common case). This crate provides:
//!
//! - [`read_message`] - read and parse a Content-Length framed request
//! - [`write_message`] - write a response with proper framing
//! - [`write_notification`] - write a notification with proper framing
//! - [`log_response`] - trace-level logging for outgoing responses
//!
//! The observer-facing WebSocket transport (`pairup-wire`) frames messages
//! differently — length-prefixed JSON inside a single binary frame — but both
//! sides exchange the same [`pairup_protocol`] message types.
//!
//! # Example
//!
//! ```no_run
//! use std::io::{BufReader, stdin, stdout};
//! use pairup_transport::{read_message, write_message};
//! use pairup_protocol::JsonRpcResponse;
//!
//! let mut reader = BufReader::new(stdin());
//! let mut writer = stdout();
//!
//! // Read an incoming message
//! if let Ok(Some(request)) = read_message(&mut reader) {
//!     // Process request and create response
//!     let response = JsonRpcResponse::null(request.id);
//!
//!     // Write the response
//!     write_message(&mut writer, &response).unwrap();
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod framing;

pub use framing::{log_response, read_message, write_message, write_notification};
