//! Account service error types.

use thiserror::Error;

/// Errors raised while hosting the account service.
#[derive(Debug, Error)]
pub enum AccountServiceError {
    /// The server could not bind its listen address.
    #[error("failed to bind account server on {addr}: {reason}")]
    Bind {
        /// Requested listen address.
        addr: String,
        /// Underlying failure.
        reason: String,
    },

    /// The server was already stopped.
    #[error("account server already stopped")]
    AlreadyStopped,

    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] tern_storage::StorageError),
}

/// Result type for account service hosting.
pub type AccountServiceResult<T> = Result<T, AccountServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_bind() {
        let err = AccountServiceError::Bind {
            addr: "127.0.0.1:1".to_string(),
            reason: "in use".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to bind account server on 127.0.0.1:1: in use"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AccountServiceError>();
    }
}
