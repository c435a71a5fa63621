//! Application-storage implementation of the account RPC API.

use std::sync::Arc;

use jsonrpsee::Methods;
use jsonrpsee::types::ErrorObjectOwned;
use tern_storage::{KvStore, ScopedKvStore, StorageError, StorageResult};
use tracing::{debug, warn};

use crate::rpc::{
    AccountRpcServer, AppStorageGetReply, AppStorageGetRequest, AppStoragePutRequest,
    AppStorageRemoveRequest, KEY_NOT_FOUND_MESSAGE, error_codes,
};

/// Namespace holding entries written with `global = true`.
pub const GLOBAL_NAMESPACE: &str = "global";

/// Namespace holding entries of the account `account_id`.
#[must_use]
pub fn account_namespace(account_id: &str) -> String {
    format!("account:{account_id}")
}

/// The account service.
///
/// Global entries are always reachable; account-scoped entries require an
/// opened account (see [`AccountService::with_account`]).
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn KvStore>,
    global: ScopedKvStore,
    account: Option<ScopedKvStore>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("global", &self.global)
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

impl AccountService {
    /// Create a service over `store` with no account opened.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the global namespace cannot be bound.
    pub fn new(store: Arc<dyn KvStore>) -> StorageResult<Self> {
        Ok(Self {
            global: ScopedKvStore::new(Arc::clone(&store), GLOBAL_NAMESPACE)?,
            store,
            account: None,
        })
    }

    /// Open `account_id` so non-global calls resolve to its namespace in the
    /// same store as the global entries.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if the account id produces an
    /// invalid namespace.
    pub fn with_account(mut self, account_id: &str) -> StorageResult<Self> {
        if account_id.is_empty() {
            return Err(StorageError::InvalidKey(
                "account id must not be empty".into(),
            ));
        }
        self.account = Some(ScopedKvStore::new(
            Arc::clone(&self.store),
            account_namespace(account_id),
        )?);
        Ok(self)
    }

    /// Whether an account is currently opened.
    #[must_use]
    pub fn has_account(&self) -> bool {
        self.account.is_some()
    }

    /// Consume the service into an in-process method table.
    ///
    /// The table is what the bridge transport dispatches into; it is also
    /// what the network server serves.
    #[must_use]
    pub fn into_methods(self) -> Methods {
        self.into_rpc().into()
    }

    fn scope(&self, global: bool) -> Result<&ScopedKvStore, ErrorObjectOwned> {
        if global {
            return Ok(&self.global);
        }
        self.account.as_ref().ok_or_else(|| {
            ErrorObjectOwned::owned(
                error_codes::ACCOUNT_NOT_OPENED,
                "no account opened",
                None::<()>,
            )
        })
    }
}

/// Translate a storage failure into an RPC error object.
fn storage_error(err: &StorageError) -> ErrorObjectOwned {
    match err {
        StorageError::InvalidKey(reason) => ErrorObjectOwned::owned(
            error_codes::INVALID_REQUEST,
            format!("invalid key: {reason}"),
            None::<()>,
        ),
        other => {
            warn!(error = %other, "account storage operation failed");
            ErrorObjectOwned::owned(error_codes::INTERNAL_ERROR, other.to_string(), None::<()>)
        },
    }
}

#[jsonrpsee::core::async_trait]
impl AccountRpcServer for AccountService {
    async fn app_storage_put(&self, request: AppStoragePutRequest) -> Result<(), ErrorObjectOwned> {
        let scope = self.scope(request.global)?;
        debug!(
            key = %request.key,
            namespace = scope.namespace(),
            bytes = request.value.len(),
            "app storage put"
        );
        scope
            .set(&request.key, request.value)
            .await
            .map_err(|e| storage_error(&e))
    }

    async fn app_storage_remove(
        &self,
        request: AppStorageRemoveRequest,
    ) -> Result<(), ErrorObjectOwned> {
        let scope = self.scope(request.global)?;
        let existed = scope
            .delete(&request.key)
            .await
            .map_err(|e| storage_error(&e))?;
        debug!(key = %request.key, namespace = scope.namespace(), existed, "app storage remove");
        Ok(())
    }

    async fn app_storage_get(
        &self,
        request: AppStorageGetRequest,
    ) -> Result<AppStorageGetReply, ErrorObjectOwned> {
        let scope = self.scope(request.global)?;
        match scope.get(&request.key).await {
            Ok(Some(value)) => Ok(AppStorageGetReply { value }),
            Ok(None) => Err(ErrorObjectOwned::owned(
                error_codes::KEY_NOT_FOUND,
                KEY_NOT_FOUND_MESSAGE,
                None::<()>,
            )),
            Err(e) => Err(storage_error(&e)),
        }
    }
}
