//! Test harness utilities.

use std::net::SocketAddr;
use std::sync::Arc;

use tempfile::TempDir;
use tern_account::{AccountServer, AccountService};
use tern_storage::{KvStore, MemoryKvStore};
use tracing_subscriber::EnvFilter;

/// Create a temporary directory for tests.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Set up test logging with the given filter.
///
/// This initializes the tracing subscriber for tests. Repeated calls are
/// harmless.
pub fn setup_test_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}

/// Set up test logging with default filter (warn level).
pub fn setup_test_logging_default() {
    setup_test_logging("warn");
}

/// A fresh account service over an in-memory store.
///
/// # Panics
///
/// Panics if the global namespace cannot be bound.
#[must_use]
#[allow(clippy::expect_used)]
pub fn memory_account_service() -> AccountService {
    let store: Arc<dyn KvStore> = Arc::new(MemoryKvStore::new());
    AccountService::new(store).expect("Failed to create account service")
}

/// Serve a fresh in-memory account service on an ephemeral loopback port.
///
/// # Panics
///
/// Panics if the server cannot bind.
#[allow(clippy::expect_used)]
pub async fn spawn_account_server() -> AccountServer {
    let addr: SocketAddr = ([127, 0, 0, 1], 0).into();
    AccountServer::start(addr, memory_account_service().into_methods())
        .await
        .expect("Failed to start account server")
}
