//! Tern Client - account storage accessor.
//!
//! Wires a host environment to the account service and exposes a small
//! key-value facade over it:
//!
//! 1. [`Environment`] names the host (browser-like or native).
//! 2. [`select_transport`] turns it into an explicit [`TransportConfig`]:
//!    browsers reach the service over HTTP/`WebSocket` at the address found
//!    in the page's location fragment, native hosts call a co-hosted service
//!    through the in-process bridge.
//! 3. [`AccountClientBuilder`] binds the account API to that transport.
//! 4. [`AccountStorage`] offers `storage_set`, `storage_remove` and
//!    `storage_get` over the global scope.
//!
//! [`AccountAccessor`] runs the whole chain once at startup.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tern_account::AccountService;
//! use tern_client::{AccessorOptions, AccountAccessor, Environment};
//! use tern_storage::MemoryKvStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = AccountService::new(Arc::new(MemoryKvStore::new()))?;
//! let accessor = AccountAccessor::connect(
//!     Environment::Native,
//!     AccessorOptions::default(),
//!     Some(service.into_methods()),
//! )?;
//!
//! let storage = accessor.storage();
//! storage.storage_set("theme", "dark").await?;
//! assert_eq!(storage.storage_get("theme").await?, "dark");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod accessor;
pub mod client;
pub mod environment;
pub mod error;
pub mod maddr;
pub mod storage;
pub mod transport;

pub use accessor::{AccessorOptions, AccountAccessor};
pub use client::{
    AccountClient, AccountClientBuilder, BridgeAccountClient, ClientOptions, LoggedAccountClient,
    RemoteAccountClient, SharedAccountClient,
};
pub use environment::{BROWSER_TAG, Environment, NATIVE_TAG};
pub use error::{AccountError, AccountResult};
pub use maddr::convert_maddr;
pub use storage::AccountStorage;
pub use transport::{
    ACCOUNT_LOG_TAG, BridgeTransport, TransportConfig, WebTransport, select_transport,
};
