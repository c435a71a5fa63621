//! Transport selection.
//!
//! Turns an [`Environment`] into an explicit [`TransportConfig`]. Selection
//! has no side effects and cannot fail: an unusable address simply yields a
//! target that fails once a call is made.

use crate::environment::Environment;
use crate::maddr::convert_maddr;

/// Tag attached to the logging middleware on bridge transports.
pub const ACCOUNT_LOG_TAG: &str = "ACCOUNT";

/// HTTP-based cross-origin transport settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebTransport {
    /// Target URL; empty when no address could be resolved.
    pub host: String,
    /// Whether cross-origin requests carry credentials.
    pub with_credentials: bool,
}

/// In-process bridge transport settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeTransport {
    /// Tag for the logging middleware; `None` disables call logging.
    pub log_tag: Option<String>,
}

/// Transport the account client is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportConfig {
    /// Reach the service over HTTP/`WebSocket`.
    Web(WebTransport),
    /// Dispatch into a service hosted in this process.
    Bridge(BridgeTransport),
}

impl TransportConfig {
    /// Short name of the transport kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Web(_) => "web",
            Self::Bridge(_) => "bridge",
        }
    }

    /// Network target, if this transport has one.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        match self {
            Self::Web(web) => Some(&web.host),
            Self::Bridge(_) => None,
        }
    }
}

/// Pick the transport for `environment`.
///
/// Browser hosts derive their target from the page location fragment
/// (leading `#` stripped, empty when absent) and talk over the web transport
/// without credentials. Native hosts use the bridge with call logging tagged
/// [`ACCOUNT_LOG_TAG`]; no address resolution happens for them.
#[must_use]
pub fn select_transport(environment: &Environment) -> TransportConfig {
    match environment {
        Environment::Browser { location_fragment } => {
            let fragment = location_fragment
                .as_deref()
                .map_or("", |f| f.strip_prefix('#').unwrap_or(f));
            TransportConfig::Web(WebTransport {
                host: convert_maddr(&[fragment]).unwrap_or_default(),
                with_credentials: false,
            })
        },
        Environment::Native => TransportConfig::Bridge(BridgeTransport {
            log_tag: Some(ACCOUNT_LOG_TAG.to_owned()),
        }),
    }
}
