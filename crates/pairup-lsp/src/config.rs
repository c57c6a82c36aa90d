//! Server configuration.
//!
//! Unlike the LSP feature flags a language server usually reads from
//! `didChangeConfiguration`, everything here is fixed at process startup:
//! log destination and verbosity, observer authentication, and the optional
//! upstream relay/signal connections. Loaded from a TOML file and overridable
//! from the command line.

use std::path::PathBuf;

use serde::Deserialize;

/// Runtime configuration for one `pairup-lsp` process.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where to write logs. `None` logs to stderr only.
    pub log_file: Option<PathBuf>,
    /// 0-5; level 5 and above also logs every JSON-RPC message.
    pub log_level: u8,
    /// Observer authentication settings.
    pub auth: AuthConfig,
    /// Relay server this editor forwards every request to, if configured.
    pub relay: Option<RelayConfig>,
    /// Signal server used to broker a direct peer connection, if configured.
    pub signal_url: Option<String>,
    /// Static page URL a human can open to view this session, shared
    /// alongside the websocket share URL.
    pub peer_page_url: Option<String>,
    /// Token used to answer an incoming peer offer supplied at startup,
    /// bypassing the interactive `experimental/connectToPeer` handshake.
    pub call_token: Option<String>,
}

/// Observer authentication settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Argon2 password hash observers must present a matching token for.
    /// `None` disables password gating (any `auth{token}` succeeds).
    pub password_hash: Option<String>,
    /// Require a client certificate on the observer's transport. Enforced
    /// by the transport, not by this crate — recorded here for
    /// completeness and to refuse startup when misconfigured.
    pub require_client_cert: bool,
    /// PEM file with CAs trusted to sign an observer's client certificate.
    pub client_ca_pool: Option<PathBuf>,
}

/// Upstream relay connection for the forwarding pipe.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// `wss://` URL of the relay server.
    pub url: String,
}

/// Errors loading configuration from disk.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file couldn't be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config file wasn't valid TOML for [`Config`].
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Ok(toml::from_str(&contents)?)
    }
}
