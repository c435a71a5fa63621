//! Tern Telemetry - Logging setup for the Tern binaries.
//!
//! Every crate logs through `tracing`; this crate installs the subscriber.
//!
//! # Example
//!
//! ```rust,no_run
//! use tern_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), tern_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("tern_client=debug");
//!
//! setup_logging(&config)?;
//! tracing::info!("ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_logging};
