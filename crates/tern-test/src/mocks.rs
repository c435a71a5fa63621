//! Mock implementations for testing.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tern_account::{
    AppStorageGetReply, AppStorageGetRequest, AppStoragePutRequest, AppStorageRemoveRequest,
    KEY_NOT_FOUND_MESSAGE, error_codes,
};
use tern_client::{AccountClient, AccountError, AccountResult};

/// A call observed by [`MockAccountClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// `appStoragePut`.
    Put(AppStoragePutRequest),
    /// `appStorageRemove`.
    Remove(AppStorageRemoveRequest),
    /// `appStorageGet`.
    Get(AppStorageGetRequest),
}

/// In-memory account client.
///
/// Implements the naive contract: put stores, remove deletes, get returns
/// what was stored or fails with the not-found message. Failures can be
/// queued with [`MockAccountClient::queue_failure`]; each queued failure is
/// returned by exactly one subsequent call.
///
/// Uses `std::sync::Mutex` internally so builder methods work without a
/// tokio runtime.
#[derive(Debug, Clone)]
pub struct MockAccountClient {
    /// Stored values keyed by `(global, key)`.
    entries: Arc<Mutex<HashMap<(bool, String), Vec<u8>>>>,
    /// Failures to return before touching `entries`.
    failures: Arc<Mutex<VecDeque<AccountError>>>,
    /// Every call, in order.
    calls: Arc<Mutex<Vec<MockCall>>>,
    /// Error returned by get for a missing key.
    not_found: AccountError,
}

impl MockAccountClient {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            not_found: AccountError::from_service(error_codes::KEY_NOT_FOUND, KEY_NOT_FOUND_MESSAGE),
        }
    }

    /// Fail gets of missing keys with `message` instead of the not-found
    /// message.
    #[must_use]
    pub fn with_missing_key_message(mut self, message: impl Into<String>) -> Self {
        self.not_found = AccountError::from_service(error_codes::INTERNAL_ERROR, message);
        self
    }

    /// Pre-populate a global entry.
    #[must_use]
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut guard) = self.entries.lock() {
            guard.insert((true, key.into()), value.into());
        }
        self
    }

    /// Make the next call fail with `error`.
    pub fn queue_failure(&self, error: AccountError) {
        if let Ok(mut guard) = self.failures.lock() {
            guard.push_back(error);
        }
    }

    /// Get all recorded calls.
    #[must_use]
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Raw bytes of a stored entry.
    #[must_use]
    pub fn stored(&self, key: &str, global: bool) -> Option<Vec<u8>> {
        self.entries
            .lock()
            .ok()
            .and_then(|g| g.get(&(global, key.to_string())).cloned())
    }

    fn record(&self, call: MockCall) -> AccountResult<()> {
        if let Ok(mut guard) = self.calls.lock() {
            guard.push(call);
        }
        match self.failures.lock().ok().and_then(|mut g| g.pop_front()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for MockAccountClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountClient for MockAccountClient {
    async fn app_storage_put(&self, request: AppStoragePutRequest) -> AccountResult<()> {
        self.record(MockCall::Put(request.clone()))?;
        if let Ok(mut guard) = self.entries.lock() {
            guard.insert((request.global, request.key), request.value);
        }
        Ok(())
    }

    async fn app_storage_remove(&self, request: AppStorageRemoveRequest) -> AccountResult<()> {
        self.record(MockCall::Remove(request.clone()))?;
        if let Ok(mut guard) = self.entries.lock() {
            guard.remove(&(request.global, request.key));
        }
        Ok(())
    }

    async fn app_storage_get(
        &self,
        request: AppStorageGetRequest,
    ) -> AccountResult<AppStorageGetReply> {
        self.record(MockCall::Get(request.clone()))?;
        self.stored(&request.key, request.global)
            .map(|value| AppStorageGetReply { value })
            .ok_or_else(|| self.not_found.clone())
    }
}
