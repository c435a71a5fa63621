//! Tern Test - Shared test utilities for the account storage crates.
//!
//! This crate provides a mock account client and test helpers that can be
//! used across the Tern crates as a dev-dependency.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! tern-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use tern_client::AccountStorage;
//! use tern_test::MockAccountClient;
//!
//! #[tokio::test]
//! async fn missing_key_reads_empty() {
//!     let storage = AccountStorage::new(Arc::new(MockAccountClient::new()));
//!     assert_eq!(storage.storage_get("absent").await.unwrap(), "");
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod harness;
pub mod mocks;

pub use harness::*;
pub use mocks::*;
