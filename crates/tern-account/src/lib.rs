//! Tern Account - the account service behind the storage accessor.
//!
//! This crate owns three things:
//!
//! - [`rpc`]: the JSON-RPC API (`account_appStoragePut`,
//!   `account_appStorageRemove`, `account_appStorageGet`) and its wire types
//! - [`AccountService`]: the application-storage implementation over a
//!   [`tern_storage::KvStore`]
//! - [`AccountServer`]: a network host for the service
//!
//! The same service can be consumed in-process through
//! [`AccountService::into_methods`], which is what the bridge transport in
//! `tern-client` dispatches into.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod rpc;
pub mod server;
pub mod service;

pub use error::{AccountServiceError, AccountServiceResult};
pub use rpc::{
    AccountRpcClient, AccountRpcServer, AppStorageGetReply, AppStorageGetRequest,
    AppStoragePutRequest, AppStorageRemoveRequest, KEY_NOT_FOUND_MESSAGE, error_codes, methods,
};
pub use server::AccountServer;
pub use service::{AccountService, GLOBAL_NAMESPACE, account_namespace};
