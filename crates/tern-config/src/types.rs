//! Configuration types.
//!
//! This crate has no dependencies on the other tern crates; sections mirror
//! their domain types and are converted at the CLI boundary. Every struct
//! implements [`Default`] so a bare `[section]` header yields a working
//! configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host environment and page location.
    pub environment: EnvironmentSection,
    /// Client transport knobs.
    pub transport: TransportSection,
    /// Network host for the account service.
    pub server: ServerSection,
    /// Backing store of the account service.
    pub storage: StorageSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

/// `[environment]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentSection {
    /// `native` or `browser`.
    pub kind: String,
    /// Location fragment of the hosting page, e.g. `/ip4/127.0.0.1/tcp/7420/ws`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_fragment: Option<String>,
}

impl Default for EnvironmentSection {
    fn default() -> Self {
        Self {
            kind: "native".to_owned(),
            location_fragment: None,
        }
    }
}

/// `[transport]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportSection {
    /// `WebSocket` connection timeout in seconds.
    pub connection_timeout_secs: u64,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Trace bridge calls.
    pub bridge_logging: bool,
}

impl Default for TransportSection {
    fn default() -> Self {
        Self {
            connection_timeout_secs: 10,
            request_timeout_secs: 30,
            bridge_logging: true,
        }
    }
}

/// `[server]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Socket address to listen on.
    pub listen_addr: String,
    /// Account to open at startup. Without one only global calls succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:7420".to_owned(),
            account_id: None,
        }
    }
}

/// `[storage]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// `file` or `memory`.
    pub backend: String,
    /// Snapshot path for the `file` backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            backend: "file".to_owned(),
            path: None,
        }
    }
}

/// `[logging]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Base level filter.
    pub level: String,
    /// `pretty`, `compact`, `json` or `full`.
    pub format: String,
    /// `stderr` or `stdout`.
    pub target: String,
    /// Prefix each line with a timestamp.
    pub timestamps: bool,
    /// Colorize output.
    pub ansi: bool,
    /// Include source file and line.
    pub file_info: bool,
    /// Extra `EnvFilter` directives, e.g. `tern_client=debug`.
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            target: "stderr".to_owned(),
            timestamps: true,
            ansi: true,
            file_info: false,
            directives: Vec::new(),
        }
    }
}
