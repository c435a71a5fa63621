//! `tern set | get | remove`: one storage call through the accessor.

use std::sync::Arc;

use anyhow::Result;
use tern_client::{AccountAccessor, Environment};
use tern_config::Config;
use tern_storage::KvStore;

use crate::config_bridge;
use crate::theme::Theme;

/// A single storage operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StorageOp {
    /// Store `value` under `key`.
    Set { key: String, value: String },
    /// Print the value of `key` (empty when missing).
    Get { key: String },
    /// Delete `key`.
    Remove { key: String },
}

/// An accessor plus the store it owns, if any.
pub(crate) struct Session {
    pub(crate) accessor: AccountAccessor,
    store: Option<Arc<dyn KvStore>>,
}

impl Session {
    /// Release the in-process store.
    pub(crate) async fn close(self) -> Result<()> {
        if let Some(store) = self.store {
            store.close().await?;
        }
        Ok(())
    }
}

/// Build an accessor for the configured environment.
///
/// Native hosts open the configured store and call the service through the
/// bridge. Browser hosts talk to the remote service named by the fragment.
pub(crate) fn connect(cfg: &Config) -> Result<Session> {
    let environment = config_bridge::to_environment(cfg);
    let (bridge, store) = match environment {
        Environment::Native => {
            let store = config_bridge::open_store(cfg)?;
            let methods = config_bridge::build_service(cfg, Arc::clone(&store))?.into_methods();
            (Some(methods), Some(store))
        },
        Environment::Browser { .. } => (None, None),
    };
    let accessor = AccountAccessor::connect(
        environment,
        config_bridge::to_accessor_options(cfg),
        bridge,
    )?;
    Ok(Session { accessor, store })
}

/// Run `op` and print its outcome.
pub(crate) async fn run_storage(cfg: &Config, op: StorageOp) -> Result<()> {
    let session = connect(cfg)?;
    let storage = session.accessor.storage();

    match op {
        StorageOp::Set { key, value } => {
            storage.storage_set(&key, &value).await?;
            eprintln!("{}", Theme::success(&format!("stored '{key}'")));
        },
        StorageOp::Get { key } => {
            let value = storage.storage_get(&key).await?;
            println!("{value}");
        },
        StorageOp::Remove { key } => {
            storage.storage_remove(&key).await?;
            eprintln!("{}", Theme::success(&format!("removed '{key}'")));
        },
    }
    session.close().await
}
