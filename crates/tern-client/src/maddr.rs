//! Multiaddr → URL conversion for the web transport.
//!
//! Accepted shape: `/{ip4|ip6|dns|dns4|dns6}/<host>/tcp/<port>[/<proto>]`
//! where `<proto>` picks the URL scheme.

use std::net::{Ipv4Addr, Ipv6Addr};

use url::Url;

/// Convert the first convertible multiaddr in `addrs` into a URL.
///
/// Returns `None` when no entry converts.
///
/// ```
/// use tern_client::maddr::convert_maddr;
///
/// assert_eq!(
///     convert_maddr(&["/ip4/127.0.0.1/tcp/1/ws"]).as_deref(),
///     Some("ws://127.0.0.1:1")
/// );
/// assert_eq!(convert_maddr(&[""]), None);
/// ```
#[must_use]
pub fn convert_maddr<S: AsRef<str>>(addrs: &[S]) -> Option<String> {
    addrs.iter().find_map(|addr| convert_one(addr.as_ref()))
}

fn convert_one(maddr: &str) -> Option<String> {
    let mut parts = maddr.strip_prefix('/')?.split('/');

    let host = match (parts.next()?, parts.next()?) {
        ("ip4", ip) => ip.parse::<Ipv4Addr>().ok()?.to_string(),
        ("ip6", ip) => format!("[{}]", ip.parse::<Ipv6Addr>().ok()?),
        ("dns" | "dns4" | "dns6", name) if !name.is_empty() => name.to_owned(),
        _ => return None,
    };

    if parts.next()? != "tcp" {
        return None;
    }
    let port: u16 = parts.next()?.parse().ok()?;

    let scheme = match parts.next() {
        None | Some("http" | "grpcweb") => "http",
        Some("https" | "grpcwebs") => "https",
        Some("ws") => "ws",
        Some("wss") => "wss",
        Some(_) => return None,
    };
    if parts.next().is_some() {
        return None;
    }

    let raw = format!("{scheme}://{host}:{port}");
    Url::parse(&raw).ok().map(|_| raw)
}
