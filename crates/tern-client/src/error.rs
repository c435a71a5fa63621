//! Accessor error types.
//!
//! Service failures are carried with their code and message untouched. The
//! one exception to "not locally classified" is the key-not-found signal,
//! which [`AccountError::from_service`] lifts into its own variant.

use jsonrpsee::core::ClientError;
use jsonrpsee::core::server::MethodsError;
use thiserror::Error;

/// Substring the account service puts in the message of a missing-key error.
///
/// This is a textual contract with the remote service, not a typed code.
/// Keep every use of it inside [`AccountError::from_service`].
const KEY_NOT_FOUND_SIGNAL: &str = "datastore: key not found";

/// Errors surfaced by the account client and storage facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// The service reported that the key does not exist.
    #[error("{message}")]
    KeyNotFound {
        /// RPC error code as sent by the service.
        code: i32,
        /// Original error message.
        message: String,
    },

    /// Any other error returned by the service.
    #[error("{message}")]
    Service {
        /// RPC error code as sent by the service.
        code: i32,
        /// Original error message.
        message: String,
    },

    /// The transport failed before a reply was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request could not be encoded.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The reply could not be decoded.
    #[error("invalid reply: {0}")]
    InvalidReply(String),

    /// The client was configured inconsistently.
    #[error("configuration error: {0}")]
    Config(String),
}

impl AccountError {
    /// Classify an error reported by the account service.
    ///
    /// Messages containing `"datastore: key not found"` become
    /// [`AccountError::KeyNotFound`]; everything else is kept as
    /// [`AccountError::Service`].
    #[must_use]
    pub fn from_service(code: i32, message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains(KEY_NOT_FOUND_SIGNAL) {
            Self::KeyNotFound { code, message }
        } else {
            Self::Service { code, message }
        }
    }

    /// Whether this error means the key does not exist.
    #[must_use]
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }

    /// RPC error code, if the error came from the service.
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::KeyNotFound { code, .. } | Self::Service { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub(crate) fn from_client_error(err: ClientError) -> Self {
        match err {
            ClientError::Call(obj) => Self::from_service(obj.code(), obj.message()),
            ClientError::ParseError(e) => Self::InvalidReply(e.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }

    pub(crate) fn from_methods_error(err: MethodsError) -> Self {
        match err {
            MethodsError::JsonRpc(obj) => Self::from_service(obj.code(), obj.message()),
            MethodsError::Parse(e) => Self::InvalidReply(e.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Convenience alias for results using [`AccountError`].
pub type AccountResult<T> = Result<T, AccountError>;

#[cfg(test)]
mod tests {
    use jsonrpsee::types::ErrorObjectOwned;

    use super::*;

    #[test]
    fn not_found_signal_matches_service_message() {
        assert_eq!(KEY_NOT_FOUND_SIGNAL, tern_account::KEY_NOT_FOUND_MESSAGE);
    }

    #[test]
    fn from_service_detects_not_found_substring() {
        let err = AccountError::from_service(-32001, "rpc error: datastore: key not found (x)");
        assert!(err.is_key_not_found());
        assert_eq!(err.code(), Some(-32001));
        assert_eq!(err.to_string(), "rpc error: datastore: key not found (x)");
    }

    #[test]
    fn from_service_keeps_other_errors_unmodified() {
        let err = AccountError::from_service(-32004, "disk full");
        assert_eq!(
            err,
            AccountError::Service {
                code: -32004,
                message: "disk full".to_string()
            }
        );
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn client_call_error_is_classified() {
        let obj = ErrorObjectOwned::owned(-32001, "datastore: key not found", None::<()>);
        let err = AccountError::from_client_error(ClientError::Call(obj));
        assert!(err.is_key_not_found());
    }

    #[test]
    fn methods_error_is_classified() {
        let obj = ErrorObjectOwned::owned(-32005, "invalid key: key must not be empty", None::<()>);
        let err = AccountError::from_methods_error(MethodsError::JsonRpc(obj));
        assert_eq!(err.code(), Some(-32005));
        assert!(!err.is_key_not_found());
    }

    #[test]
    fn transport_errors_have_no_code() {
        assert_eq!(AccountError::Transport("refused".into()).code(), None);
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AccountError>();
    }
}
