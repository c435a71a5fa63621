//! Bridge transport: dispatch into the account service's method table
//! without leaving the process.

use async_trait::async_trait;
use jsonrpsee::Methods;
use jsonrpsee::core::params::ArrayParams;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tern_account::{
    AppStorageGetReply, AppStorageGetRequest, AppStoragePutRequest, AppStorageRemoveRequest,
    methods,
};

use super::AccountClient;
use crate::error::{AccountError, AccountResult};

/// Account client that calls a co-hosted service directly.
///
/// Requests still go through JSON (de)serialization, so the service sees
/// exactly what it would see over the network.
#[derive(Clone)]
pub struct BridgeAccountClient {
    methods: Methods,
}

impl std::fmt::Debug for BridgeAccountClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeAccountClient")
            .field("methods", &self.methods.method_names().count())
            .finish()
    }
}

impl BridgeAccountClient {
    /// Wrap a service method table.
    #[must_use]
    pub fn new(methods: impl Into<Methods>) -> Self {
        Self {
            methods: methods.into(),
        }
    }

    async fn call<T>(&self, method: &'static str, request: impl Serialize) -> AccountResult<T>
    where
        T: DeserializeOwned + Clone,
    {
        let mut params = ArrayParams::new();
        params
            .insert(request)
            .map_err(|e| AccountError::InvalidRequest(e.to_string()))?;
        self.methods
            .call(method, params)
            .await
            .map_err(AccountError::from_methods_error)
    }
}

#[async_trait]
impl AccountClient for BridgeAccountClient {
    async fn app_storage_put(&self, request: AppStoragePutRequest) -> AccountResult<()> {
        self.call(methods::APP_STORAGE_PUT, request).await
    }

    async fn app_storage_remove(&self, request: AppStorageRemoveRequest) -> AccountResult<()> {
        self.call(methods::APP_STORAGE_REMOVE, request).await
    }

    async fn app_storage_get(
        &self,
        request: AppStorageGetRequest,
    ) -> AccountResult<AppStorageGetReply> {
        self.call(methods::APP_STORAGE_GET, request).await
    }
}
