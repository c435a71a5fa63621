//! One-shot wiring: environment → transport → client → storage facade.

use jsonrpsee::Methods;
use tracing::info;

use crate::client::{AccountClientBuilder, ClientOptions};
use crate::environment::Environment;
use crate::error::AccountResult;
use crate::storage::AccountStorage;
use crate::transport::{TransportConfig, select_transport};

/// Options for [`AccountAccessor::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessorOptions {
    /// Network timeouts for the web transport.
    pub client: ClientOptions,
    /// Trace bridge calls under the `ACCOUNT` tag.
    pub log_bridge_calls: bool,
}

impl Default for AccessorOptions {
    fn default() -> Self {
        Self {
            client: ClientOptions::default(),
            log_bridge_calls: true,
        }
    }
}

/// The account accessor.
///
/// Build it once at startup and hand out [`AccountAccessor::storage`] (or
/// clones of it) to every call site. The transport is fixed for the
/// accessor's lifetime.
#[derive(Debug, Clone)]
pub struct AccountAccessor {
    environment: Environment,
    transport: TransportConfig,
    storage: AccountStorage,
}

impl AccountAccessor {
    /// Select a transport for `environment` and build the client.
    ///
    /// `bridge` is the co-hosted service's method table. It is required for
    /// native environments and ignored for browser ones.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Config`](crate::AccountError::Config) if a
    /// native environment is given no method table.
    pub fn connect(
        environment: Environment,
        options: AccessorOptions,
        bridge: Option<Methods>,
    ) -> AccountResult<Self> {
        let mut transport = select_transport(&environment);
        if let TransportConfig::Bridge(b) = &mut transport
            && !options.log_bridge_calls
        {
            b.log_tag = None;
        }

        info!(
            environment = environment.tag(),
            transport = transport.kind(),
            host = transport.host().unwrap_or_default(),
            "account accessor ready"
        );

        let mut builder = AccountClientBuilder::new(transport.clone()).options(options.client);
        if let Some(methods) = bridge {
            builder = builder.bridge(methods);
        }
        let client = builder.build()?;

        Ok(Self {
            environment,
            transport,
            storage: AccountStorage::new(client),
        })
    }

    /// The environment the accessor was built for.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The selected transport.
    #[must_use]
    pub fn transport(&self) -> &TransportConfig {
        &self.transport
    }

    /// The storage facade.
    #[must_use]
    pub fn storage(&self) -> &AccountStorage {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tern_account::AccountService;
    use tern_storage::MemoryKvStore;

    use super::*;
    use crate::error::AccountError;

    fn methods() -> Methods {
        AccountService::new(Arc::new(MemoryKvStore::new()))
            .unwrap()
            .into_methods()
    }

    #[tokio::test]
    async fn native_uses_bridge() {
        let accessor =
            AccountAccessor::connect(Environment::Native, AccessorOptions::default(), Some(methods()))
                .unwrap();
        assert_eq!(accessor.transport().kind(), "bridge");
        assert_eq!(accessor.environment(), &Environment::Native);

        let storage = accessor.storage();
        storage.storage_set("greeting", "héllo").await.unwrap();
        assert_eq!(storage.storage_get("greeting").await.unwrap(), "héllo");
    }

    #[test]
    fn disabling_bridge_logging_clears_tag() {
        let options = AccessorOptions {
            log_bridge_calls: false,
            ..AccessorOptions::default()
        };
        let accessor =
            AccountAccessor::connect(Environment::Native, options, Some(methods())).unwrap();
        match accessor.transport() {
            TransportConfig::Bridge(b) => assert!(b.log_tag.is_none()),
            TransportConfig::Web(_) => panic!("expected bridge"),
        }
    }

    #[test]
    fn native_without_bridge_fails() {
        let err = AccountAccessor::connect(Environment::Native, AccessorOptions::default(), None)
            .unwrap_err();
        assert!(matches!(err, AccountError::Config(_)));
    }

    #[test]
    fn browser_resolves_fragment() {
        let env = Environment::Browser {
            location_fragment: Some("#/ip4/127.0.0.1/tcp/1/ws".into()),
        };
        let accessor = AccountAccessor::connect(env, AccessorOptions::default(), None).unwrap();
        assert_eq!(accessor.transport().host(), Some("ws://127.0.0.1:1"));
    }
}
