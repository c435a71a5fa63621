//! Tern Storage - namespaced key-value persistence.
//!
//! The account service keeps application storage in a [`KvStore`]. Two
//! backends are provided:
//!
//! - [`MemoryKvStore`]: ephemeral, for tests and throwaway hosts
//! - `SurrealKvStore` (feature `kv`): persistent `SurrealKV` tree
//!
//! Use [`ScopedKvStore`] to pre-bind a namespace so callers never juggle
//! namespace strings themselves.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod kv;

pub use error::{StorageError, StorageResult};
pub use kv::{KvStore, MemoryKvStore, ScopedKvStore};

#[cfg(feature = "kv")]
pub use kv::SurrealKvStore;
