//! Tern CLI - account storage from the command line.
//!
//! `tern serve` hosts the account service on the network. `tern set`,
//! `tern get` and `tern remove` go through the same accessor an embedding
//! application would use: in the native environment the service runs
//! in-process behind the bridge, in the browser environment calls go to the
//! server named by the location fragment.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config_bridge;
mod theme;

use commands::storage::StorageOp;
use commands::{config, serve, storage};
use theme::Theme;

/// Tern - account storage service and client
#[derive(Parser)]
#[command(name = "tern")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a configuration file layered over ~/.tern/config.toml
    #[arg(short, long, global = true, env = "TERN_CONFIG")]
    config: Option<PathBuf>,

    /// Host environment: native or browser
    #[arg(short, long, global = true)]
    environment: Option<String>,

    /// Location fragment locating the service, e.g. /ip4/127.0.0.1/tcp/7420/ws
    #[arg(short, long, global = true)]
    fragment: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the account service over HTTP and WebSocket
    Serve {
        /// Override the listen address
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Store a value
    Set {
        /// Storage key
        key: String,
        /// Value to store
        value: String,
    },
    /// Print a value (empty when the key is missing)
    Get {
        /// Storage key
        key: String,
    },
    /// Delete a value
    Remove {
        /// Storage key
        key: String,
    },
    /// Show the resolved configuration
    Config,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}", Theme::error(&format!("{e:#}")));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut resolved = tern_config::Config::load(cli.config.as_deref())?;

    // Command-line flags beat every config layer.
    if let Some(kind) = cli.environment {
        resolved.config.environment.kind = kind;
    }
    if let Some(fragment) = cli.fragment {
        resolved.config.environment.location_fragment = Some(fragment);
    }
    if let Commands::Serve {
        listen: Some(listen),
    } = &cli.command
    {
        resolved.config.server.listen_addr.clone_from(listen);
    }
    tern_config::validate::validate(&resolved.config)?;

    let mut log_config = config_bridge::to_log_config(&resolved.config)?;
    if cli.verbose {
        "debug".clone_into(&mut log_config.level);
    }
    if let Err(e) = tern_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let cfg = &resolved.config;
    match cli.command {
        Commands::Serve { .. } => serve::run_serve(cfg).await,
        Commands::Set { key, value } => storage::run_storage(cfg, StorageOp::Set { key, value }).await,
        Commands::Get { key } => storage::run_storage(cfg, StorageOp::Get { key }).await,
        Commands::Remove { key } => storage::run_storage(cfg, StorageOp::Remove { key }).await,
        Commands::Config => config::show_config(&resolved),
    }
}
