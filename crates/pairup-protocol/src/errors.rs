//! Standard JSON-RPC 2.0 error codes.
//!
//! Codes below -32000 are reserved by the JSON-RPC spec; `SERVER_NOT_INITIALIZED`
//! and `UNAUTHORIZED` are server-defined extensions used by this protocol.

use crate::JsonRpcError;

/// Invalid JSON was received by the server.
pub const PARSE_ERROR: i32 = -32700;

/// The JSON sent is not a valid request object.
pub const INVALID_REQUEST: i32 = -32600;

/// The method does not exist or is not available.
pub const METHOD_NOT_FOUND: i32 = -32601;

/// Invalid method parameter(s).
pub const INVALID_PARAMS: i32 = -32602;

/// Internal JSON-RPC error.
pub const INTERNAL_ERROR: i32 = -32603;

/// A request was received before `initialize` completed.
pub const SERVER_NOT_INITIALIZED: i32 = -32002;

/// Observer authentication failed or was never attempted.
pub const UNAUTHORIZED: i32 = 401;

/// Build a `MethodNotFound` error for an unrecognized method name.
pub fn method_not_found(method: &str) -> JsonRpcError {
    JsonRpcError::new(METHOD_NOT_FOUND, format!("method not found: {method}"))
}

/// Build an `InvalidParams` error, optionally naming the field that failed to decode.
pub fn invalid_params(detail: impl std::fmt::Display) -> JsonRpcError {
    JsonRpcError::new(INVALID_PARAMS, format!("invalid params: {detail}"))
}

/// Build an `InternalError` for a caught handler panic or other fault on the
/// server's side, as opposed to a malformed or unrecognized request.
pub fn internal_error(detail: impl std::fmt::Display) -> JsonRpcError {
    JsonRpcError::new(INTERNAL_ERROR, format!("internal error: {detail}"))
}

/// Build a `ServerNotInitialized` error for requests arriving before `initialize`.
pub fn server_not_initialized() -> JsonRpcError {
    JsonRpcError::new(SERVER_NOT_INITIALIZED, "server not initialized")
}

/// Build an `Unauthorized` error for a failed or missing observer auth token.
pub fn unauthorized() -> JsonRpcError {
    JsonRpcError::new(UNAUTHORIZED, "unauthorized")
}
