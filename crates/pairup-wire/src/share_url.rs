//! Share URL construction.
//!
//! Given the WebSocket URL observers connect to and an optional auth token,
//! build the `http(s)://` URL a human would paste into a browser.

/// The input wasn't a `ws://` or `wss://` URL.
#[derive(Debug, thiserror::Error)]
#[error("not a ws:// or wss:// URL: {0}")]
pub struct NotAWebSocketUrl(pub String);

/// Strip the `ws`/`wss` scheme, replace with `http`/`https`, drop default
/// ports, and append `/<token>` when `token` is non-empty.
pub fn share_url(ws_url: &str, token: Option<&str>) -> Result<String, NotAWebSocketUrl> {
    let (scheme, rest) = if let Some(rest) = ws_url.strip_prefix("wss://") {
        ("https", rest)
    } else if let Some(rest) = ws_url.strip_prefix("ws://") {
        ("http", rest)
    } else {
        return Err(NotAWebSocketUrl(ws_url.to_string()));
    };

    let (authority, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, ""),
    };
    let default_port = if scheme == "https" { ":443" } else { ":80" };
    let authority = authority.strip_suffix(default_port).unwrap_or(authority);

    let mut result = format!("{scheme}://{authority}{path}");
    if let Some(token) = token {
        if !token.is_empty() {
            if !result.ends_with('/') {
                result.push('/');
            }
            result.push_str(token);
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_scheme_and_drops_default_ports() {
        assert_eq!(
            share_url("wss://example.com:443/observe", None).expect("valid"),
            "https://example.com/observe"
        );
        assert_eq!(share_url("ws://example.com:80/observe", None).expect("valid"), "http://example.com/observe");
    }

    #[test]
    fn keeps_non_default_ports() {
        assert_eq!(share_url("ws://example.com:8080/observe", None).expect("valid"), "http://example.com:8080/observe");
    }

    #[test]
    fn appends_token_when_present() {
        assert_eq!(
            share_url("wss://example.com/observe", Some("tok123")).expect("valid"),
            "https://example.com/observe/tok123"
        );
    }

    #[test]
    fn empty_token_appends_nothing() {
        assert_eq!(share_url("wss://example.com/observe", Some("")).expect("valid"), "https://example.com/observe");
    }

    #[test]
    fn rejects_non_websocket_schemes() {
        assert!(share_url("http://example.com", None).is_err());
    }
}
