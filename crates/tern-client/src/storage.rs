//! Key-value facade over the account client.
//!
//! Every call addresses the global scope. Values are text on this side and
//! raw UTF-8 bytes on the wire.

use tern_account::{AppStorageGetRequest, AppStoragePutRequest, AppStorageRemoveRequest};

use crate::client::SharedAccountClient;
use crate::error::AccountResult;

/// Storage facade.
///
/// Cloning is cheap; all clones share the same client.
#[derive(Clone)]
pub struct AccountStorage {
    client: SharedAccountClient,
}

impl std::fmt::Debug for AccountStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountStorage").finish_non_exhaustive()
    }
}

impl AccountStorage {
    /// Wrap a client.
    #[must_use]
    pub fn new(client: SharedAccountClient) -> Self {
        Self { client }
    }

    /// The underlying client.
    #[must_use]
    pub fn client(&self) -> &SharedAccountClient {
        &self.client
    }

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Propagates any transport or service error unmodified.
    pub async fn storage_set(&self, key: &str, value: &str) -> AccountResult<()> {
        self.client
            .app_storage_put(AppStoragePutRequest {
                key: key.to_owned(),
                value: value.as_bytes().to_vec(),
                global: true,
            })
            .await
    }

    /// Delete `key`.
    ///
    /// # Errors
    ///
    /// Propagates any transport or service error unmodified.
    pub async fn storage_remove(&self, key: &str) -> AccountResult<()> {
        self.client
            .app_storage_remove(AppStorageRemoveRequest {
                key: key.to_owned(),
                global: true,
            })
            .await
    }

    /// Fetch the text stored under `key`.
    ///
    /// A missing key reads as the empty string. Bytes that are not valid
    /// UTF-8 are replaced with U+FFFD.
    ///
    /// # Errors
    ///
    /// Propagates every error other than key-not-found unmodified.
    pub async fn storage_get(&self, key: &str) -> AccountResult<String> {
        let result = self
            .client
            .app_storage_get(AppStorageGetRequest {
                key: key.to_owned(),
                global: true,
            })
            .await;
        match result {
            Ok(reply) => Ok(String::from_utf8_lossy(&reply.value).into_owned()),
            Err(e) if e.is_key_not_found() => Ok(String::new()),
            Err(e) => Err(e),
        }
    }
}
