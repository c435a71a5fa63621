//! Bridge from `tern_config::Config` to domain types.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tern_account::AccountService;
use tern_client::{AccessorOptions, ClientOptions, Environment};
use tern_config::Config;
use tern_storage::{KvStore, MemoryKvStore, SurrealKvStore};
use tern_telemetry::{LogConfig, LogFormat, LogTarget};
use tracing::info;

/// Logging settings from the `[logging]` section.
///
/// Runs before any subscriber exists, so problems are returned rather than
/// logged.
pub(crate) fn to_log_config(cfg: &Config) -> Result<LogConfig> {
    let l = &cfg.logging;
    let format: LogFormat = l
        .format
        .parse()
        .with_context(|| format!("invalid logging.format '{}'", l.format))?;
    let target: LogTarget = l
        .target
        .parse()
        .with_context(|| format!("invalid logging.target '{}'", l.target))?;

    let mut lc = LogConfig::new(l.level.clone())
        .with_format(format)
        .with_target(target);
    if !l.timestamps {
        lc = lc.without_timestamps();
    }
    if !l.ansi {
        lc = lc.without_ansi();
    }
    if l.file_info {
        lc = lc.with_file_info();
    }
    for directive in &l.directives {
        lc = lc.with_directive(directive.clone());
    }
    Ok(lc)
}

/// Host environment from the `[environment]` section.
pub(crate) fn to_environment(cfg: &Config) -> Environment {
    Environment::from_tag(
        &cfg.environment.kind,
        cfg.environment.location_fragment.clone(),
    )
}

/// Accessor options from the `[transport]` section.
pub(crate) fn to_accessor_options(cfg: &Config) -> AccessorOptions {
    AccessorOptions {
        client: ClientOptions {
            connection_timeout: Duration::from_secs(cfg.transport.connection_timeout_secs),
            request_timeout: Duration::from_secs(cfg.transport.request_timeout_secs),
        },
        log_bridge_calls: cfg.transport.bridge_logging,
    }
}

/// Listen address from the `[server]` section.
pub(crate) fn listen_addr(cfg: &Config) -> Result<SocketAddr> {
    cfg.server
        .listen_addr
        .parse()
        .with_context(|| format!("invalid server.listen_addr '{}'", cfg.server.listen_addr))
}

/// Directory of the file backend: `storage.path`, else `~/.tern/storage`.
pub(crate) fn storage_path(cfg: &Config) -> Result<PathBuf> {
    if let Some(path) = &cfg.storage.path {
        return Ok(path.clone());
    }
    Ok(tern_config::tern_home()?.join("storage"))
}

/// Open the backing store named by the `[storage]` section.
pub(crate) fn open_store(cfg: &Config) -> Result<Arc<dyn KvStore>> {
    match cfg.storage.backend.as_str() {
        "memory" => {
            info!("using in-memory account storage");
            Ok(Arc::new(MemoryKvStore::new()))
        },
        "file" => {
            let path = storage_path(cfg)?;
            let store = SurrealKvStore::open(&path)
                .with_context(|| format!("failed to open storage at {}", path.display()))?;
            info!(path = %path.display(), "using surrealkv account storage");
            Ok(Arc::new(store))
        },
        other => bail!("unsupported storage backend '{other}'"),
    }
}

/// Build the account service over `store`, opening `server.account_id` if set.
pub(crate) fn build_service(cfg: &Config, store: Arc<dyn KvStore>) -> Result<AccountService> {
    let service = AccountService::new(store)?;
    match cfg.server.account_id.as_deref() {
        Some(id) => Ok(service.with_account(id)?),
        None => Ok(service),
    }
}
