//! The account client abstraction and its construction.
//!
//! [`AccountClient`] is the capability set the storage facade needs. It is
//! implemented by:
//!
//! - [`RemoteAccountClient`]: generated JSON-RPC client over HTTP or `WebSocket`
//! - [`BridgeAccountClient`]: in-process dispatch into the service's method table
//! - [`LoggedAccountClient`]: middleware that traces every call of an inner client
//!
//! [`AccountClientBuilder`] binds the interface to a [`TransportConfig`].

mod bridge;
mod logger;
mod remote;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use jsonrpsee::Methods;
use tern_account::{
    AppStorageGetReply, AppStorageGetRequest, AppStoragePutRequest, AppStorageRemoveRequest,
};

pub use bridge::BridgeAccountClient;
pub use logger::LoggedAccountClient;
pub use remote::RemoteAccountClient;

use crate::error::{AccountError, AccountResult};
use crate::transport::TransportConfig;

/// Application-storage RPCs of the account service.
#[async_trait]
pub trait AccountClient: Send + Sync {
    /// Store a value.
    async fn app_storage_put(&self, request: AppStoragePutRequest) -> AccountResult<()>;

    /// Delete a value.
    async fn app_storage_remove(&self, request: AppStorageRemoveRequest) -> AccountResult<()>;

    /// Fetch a value.
    async fn app_storage_get(
        &self,
        request: AppStorageGetRequest,
    ) -> AccountResult<AppStorageGetReply>;
}

/// Shared, immutable handle to an account client.
pub type SharedAccountClient = Arc<dyn AccountClient>;

/// Timeouts handed to the `jsonrpsee` clients of the web transport.
///
/// Nothing above the transport times out a call; an expired request comes
/// back as [`AccountError::Transport`]. The bridge transport ignores these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    /// `WebSocket` connection timeout.
    pub connection_timeout: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connection_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Builds the single account client for a transport.
pub struct AccountClientBuilder {
    transport: TransportConfig,
    options: ClientOptions,
    bridge: Option<Methods>,
}

impl std::fmt::Debug for AccountClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountClientBuilder")
            .field("transport", &self.transport)
            .field("options", &self.options)
            .field("bridge", &self.bridge.is_some())
            .finish()
    }
}

impl AccountClientBuilder {
    /// Start building a client for `transport`.
    #[must_use]
    pub fn new(transport: TransportConfig) -> Self {
        Self {
            transport,
            options: ClientOptions::default(),
            bridge: None,
        }
    }

    /// Override network timeouts.
    #[must_use]
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Provide the in-process method table used by the bridge transport.
    #[must_use]
    pub fn bridge(mut self, methods: impl Into<Methods>) -> Self {
        self.bridge = Some(methods.into());
        self
    }

    /// Build the client.
    ///
    /// No connection is made here; network failures surface on the first
    /// call.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Config`] if the bridge transport is selected
    /// without a method table, or if the web transport asks for credentials.
    pub fn build(self) -> AccountResult<SharedAccountClient> {
        match self.transport {
            TransportConfig::Web(web) => {
                Ok(Arc::new(RemoteAccountClient::new(&web, self.options)?))
            },
            TransportConfig::Bridge(bridge) => {
                let methods = self.bridge.ok_or_else(|| {
                    AccountError::Config(
                        "bridge transport selected but no in-process account service was provided"
                            .to_string(),
                    )
                })?;
                let client = BridgeAccountClient::new(methods);
                let client: SharedAccountClient = match bridge.log_tag {
                    Some(tag) => Arc::new(LoggedAccountClient::new(tag, client)),
                    None => Arc::new(client),
                };
                Ok(client)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use tern_account::AccountService;
    use tern_storage::MemoryKvStore;

    use super::*;
    use crate::transport::{BridgeTransport, WebTransport};

    fn methods() -> Methods {
        AccountService::new(Arc::new(MemoryKvStore::new()))
            .unwrap()
            .into_methods()
    }

    #[test]
    fn bridge_without_methods_is_a_config_error() {
        let result = AccountClientBuilder::new(TransportConfig::Bridge(BridgeTransport {
            log_tag: None,
        }))
        .build();
        assert!(matches!(result, Err(AccountError::Config(_))));
    }

    #[test]
    fn web_with_credentials_is_a_config_error() {
        let result = AccountClientBuilder::new(TransportConfig::Web(WebTransport {
            host: "http://127.0.0.1:1".into(),
            with_credentials: true,
        }))
        .build();
        assert!(matches!(result, Err(AccountError::Config(_))));
    }

    #[tokio::test]
    async fn bridge_client_round_trips() {
        let client = AccountClientBuilder::new(TransportConfig::Bridge(BridgeTransport {
            log_tag: Some("ACCOUNT".into()),
        }))
        .bridge(methods())
        .build()
        .unwrap();

        client
            .app_storage_put(AppStoragePutRequest {
                key: "k".into(),
                value: b"v".to_vec(),
                global: true,
            })
            .await
            .unwrap();
        let reply = client
            .app_storage_get(AppStorageGetRequest {
                key: "k".into(),
                global: true,
            })
            .await
            .unwrap();
        assert_eq!(reply.value, b"v");
    }

    #[tokio::test]
    async fn empty_web_host_fails_on_first_call() {
        let client = AccountClientBuilder::new(TransportConfig::Web(WebTransport {
            host: String::new(),
            with_credentials: false,
        }))
        .build()
        .unwrap();

        let err = client
            .app_storage_remove(AppStorageRemoveRequest {
                key: "k".into(),
                global: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Transport(_)));
    }
}
