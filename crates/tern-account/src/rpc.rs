//! JSON-RPC API definition for the account service.
//!
//! Uses jsonrpsee proc macros to define the RPC interface. The service
//! implements the server side; the accessor in `tern-client` uses the
//! generated client over HTTP/WebSocket, or dispatches into the server's
//! method table in-process when both live in the same host.

use jsonrpsee::proc_macros::rpc;
use jsonrpsee::types::ErrorObjectOwned;
use serde::{Deserialize, Serialize};

// ---------- Wire types ----------

/// Store `value` under `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStoragePutRequest {
    /// Storage key.
    pub key: String,
    /// Raw value bytes (base64 on the wire).
    #[serde(with = "base64_bytes", default)]
    pub value: Vec<u8>,
    /// Whether the entry lives in the process-wide scope rather than the
    /// opened account.
    #[serde(default)]
    pub global: bool,
}

/// Delete `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStorageRemoveRequest {
    /// Storage key.
    pub key: String,
    /// Scope flag, see [`AppStoragePutRequest::global`].
    #[serde(default)]
    pub global: bool,
}

/// Fetch the value stored under `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStorageGetRequest {
    /// Storage key.
    pub key: String,
    /// Scope flag, see [`AppStoragePutRequest::global`].
    #[serde(default)]
    pub global: bool,
}

/// Reply to [`AppStorageGetRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStorageGetReply {
    /// Raw value bytes (base64 on the wire).
    #[serde(with = "base64_bytes", default)]
    pub value: Vec<u8>,
}

/// `bytes` fields travel as standard base64 strings.
mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}

// ---------- RPC API ----------

/// The account service RPC API (application-storage subset).
///
/// Implemented by [`AccountService`](crate::AccountService) (server side).
/// Called by the accessor (client side).
#[rpc(server, client, namespace = "account")]
pub trait AccountRpc {
    /// Store a value.
    #[method(name = "appStoragePut")]
    async fn app_storage_put(&self, request: AppStoragePutRequest) -> Result<(), ErrorObjectOwned>;

    /// Delete a value. Deleting a missing key succeeds.
    #[method(name = "appStorageRemove")]
    async fn app_storage_remove(
        &self,
        request: AppStorageRemoveRequest,
    ) -> Result<(), ErrorObjectOwned>;

    /// Fetch a value. A missing key fails with [`error_codes::KEY_NOT_FOUND`].
    #[method(name = "appStorageGet")]
    async fn app_storage_get(
        &self,
        request: AppStorageGetRequest,
    ) -> Result<AppStorageGetReply, ErrorObjectOwned>;
}

/// Fully-qualified method names, as registered in the server's method table.
pub mod methods {
    /// `account_appStoragePut`.
    pub const APP_STORAGE_PUT: &str = "account_appStoragePut";
    /// `account_appStorageRemove`.
    pub const APP_STORAGE_REMOVE: &str = "account_appStorageRemove";
    /// `account_appStorageGet`.
    pub const APP_STORAGE_GET: &str = "account_appStorageGet";
}

/// Error message returned for a missing key.
///
/// Clients match on this text, so it must stay byte-for-byte stable.
pub const KEY_NOT_FOUND_MESSAGE: &str = "datastore: key not found";

/// RPC error codes.
pub mod error_codes {
    /// The requested key does not exist.
    pub const KEY_NOT_FOUND: i32 = -32001;
    /// A non-global call was made while no account is opened.
    pub const ACCOUNT_NOT_OPENED: i32 = -32002;
    /// Internal service error.
    pub const INTERNAL_ERROR: i32 = -32004;
    /// Invalid request (bad parameters, etc.).
    pub const INVALID_REQUEST: i32 = -32005;
}
