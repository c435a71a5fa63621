//! Call-tracing middleware for account clients.

use std::time::Instant;

use async_trait::async_trait;
use tern_account::{
    AppStorageGetReply, AppStorageGetRequest, AppStoragePutRequest, AppStorageRemoveRequest,
};
use tracing::{debug, warn};

use super::AccountClient;
use crate::error::AccountResult;

/// Wraps an [`AccountClient`] and logs every call under a fixed tag.
#[derive(Debug)]
pub struct LoggedAccountClient<C> {
    tag: String,
    inner: C,
}

impl<C: AccountClient> LoggedAccountClient<C> {
    /// Trace calls of `inner` under `tag`.
    pub fn new(tag: impl Into<String>, inner: C) -> Self {
        Self {
            tag: tag.into(),
            inner,
        }
    }

    /// The log tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn finish<T>(&self, method: &str, key: &str, started: Instant, result: &AccountResult<T>) {
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match result {
            Ok(_) => debug!(tag = %self.tag, method, key, elapsed_ms, "account call ok"),
            Err(e) if e.is_key_not_found() => {
                debug!(tag = %self.tag, method, key, elapsed_ms, "account call: key not found");
            },
            Err(e) => {
                warn!(tag = %self.tag, method, key, elapsed_ms, error = %e, "account call failed");
            },
        }
    }
}

#[async_trait]
impl<C: AccountClient> AccountClient for LoggedAccountClient<C> {
    async fn app_storage_put(&self, request: AppStoragePutRequest) -> AccountResult<()> {
        let key = request.key.clone();
        debug!(tag = %self.tag, method = "appStoragePut", key = %key, global = request.global, bytes = request.value.len(), "account call");
        let started = Instant::now();
        let result = self.inner.app_storage_put(request).await;
        self.finish("appStoragePut", &key, started, &result);
        result
    }

    async fn app_storage_remove(&self, request: AppStorageRemoveRequest) -> AccountResult<()> {
        let key = request.key.clone();
        debug!(tag = %self.tag, method = "appStorageRemove", key = %key, global = request.global, "account call");
        let started = Instant::now();
        let result = self.inner.app_storage_remove(request).await;
        self.finish("appStorageRemove", &key, started, &result);
        result
    }

    async fn app_storage_get(
        &self,
        request: AppStorageGetRequest,
    ) -> AccountResult<AppStorageGetReply> {
        let key = request.key.clone();
        debug!(tag = %self.tag, method = "appStorageGet", key = %key, global = request.global, "account call");
        let started = Instant::now();
        let result = self.inner.app_storage_get(request).await;
        self.finish("appStorageGet", &key, started, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::AccountError;

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AccountClient for Counting {
        async fn app_storage_put(&self, _: AppStoragePutRequest) -> AccountResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn app_storage_remove(&self, _: AppStorageRemoveRequest) -> AccountResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AccountError::Transport("down".into()))
        }

        async fn app_storage_get(
            &self,
            _: AppStorageGetRequest,
        ) -> AccountResult<AppStorageGetReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AccountError::from_service(-32001, "datastore: key not found"))
        }
    }

    #[tokio::test]
    async fn passes_results_through_unchanged() {
        let client = LoggedAccountClient::new("ACCOUNT", Counting::default());
        assert_eq!(client.tag(), "ACCOUNT");

        client
            .app_storage_put(AppStoragePutRequest {
                key: "k".into(),
                value: Vec::new(),
                global: true,
            })
            .await
            .unwrap();
        let err = client
            .app_storage_remove(AppStorageRemoveRequest {
                key: "k".into(),
                global: true,
            })
            .await
            .unwrap_err();
        assert_eq!(err, AccountError::Transport("down".into()));
        let err = client
            .app_storage_get(AppStorageGetRequest {
                key: "k".into(),
                global: true,
            })
            .await
            .unwrap_err();
        assert!(err.is_key_not_found());

        assert_eq!(client.inner.calls.load(Ordering::SeqCst), 3);
    }
}
