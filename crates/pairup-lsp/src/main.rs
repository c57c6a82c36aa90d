//! pairup-lsp binary entry point.
//!
//! Starts the collaborative LSP backend on stdio, optionally loading a
//! config file for observer auth and relay forwarding.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use pairup_lsp::{Config, LspServer};

/// Collaborative pair-programming LSP backend.
#[derive(Parser, Debug)]
#[command(name = "pairup-lsp", version, about, long_about = None)]
struct Args {
    /// Path to a TOML config file (log settings, observer auth, relay URL).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured relay URL.
    #[arg(long)]
    relay_url: Option<String>,

    /// Logging level (error, warn, info, debug, trace). Also sets the
    /// config's numeric `log_level` (0-5), which gates RPC-level tracing.
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

/// Map a `tracing`-style level name to the config's 0-5 verbosity scale.
/// Unrecognized names fall back to `info`'s level rather than erroring,
/// since this only affects RPC-dump gating, never whether the server starts.
fn verbosity_from_level(level: &str) -> u8 {
    match level {
        "error" => 0,
        "warn" => 1,
        "info" => 2,
        "debug" => 3,
        "trace" => 4,
        _ => 2,
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref().unwrap_or("info"));

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(url) = args.relay_url {
        config.relay = Some(pairup_lsp::config::RelayConfig { url });
    }
    if let Some(level) = &args.log_level {
        config.log_level = verbosity_from_level(level);
    }

    tracing::info!("pairup-lsp starting on stdio");
    let mut server = LspServer::new(&config);

    let exit_code = match tokio::task::spawn_blocking(move || server.run()).await {
        Ok(Ok(())) => 0,
        Ok(Err(err)) => {
            tracing::error!(%err, "stdio loop failed");
            1
        }
        Err(err) => {
            tracing::error!(%err, "server task panicked");
            1
        }
    };

    std::process::exit(exit_code);
}
