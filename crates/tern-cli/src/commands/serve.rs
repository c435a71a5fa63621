//! `tern serve`: host the account service on the network.

use std::sync::Arc;

use anyhow::Result;
use tern_account::AccountServer;
use tern_config::Config;
use tracing::info;

use crate::config_bridge;
use crate::theme::Theme;

/// Serve until Ctrl-C.
pub(crate) async fn run_serve(cfg: &Config) -> Result<()> {
    let addr = config_bridge::listen_addr(cfg)?;
    let store = config_bridge::open_store(cfg)?;
    let service = config_bridge::build_service(cfg, Arc::clone(&store))?;
    let has_account = service.has_account();

    let server = AccountServer::start(addr, service.into_methods()).await?;
    let local = server.local_addr();

    println!("{}", Theme::header("Tern account service"));
    println!("{}", Theme::success(&format!("listening on {local}")));
    println!("  http: {}", server.http_url());
    println!("  ws:   {}", server.ws_url());
    println!(
        "{}",
        Theme::info(&format!(
            "browser clients: --environment browser --fragment {}",
            location_fragment(local)
        ))
    );
    if !has_account {
        println!(
            "{}",
            Theme::dimmed("no account opened; only global storage is available")
        );
    }

    tokio::signal::ctrl_c().await?;
    info!("shutting down account server");
    server.stop()?;
    server.stopped().await;
    store.close().await?;
    println!("{}", Theme::success("stopped"));
    Ok(())
}

/// The location fragment browser clients use to reach `addr` over `WebSocket`.
pub(crate) fn location_fragment(addr: std::net::SocketAddr) -> String {
    match addr {
        std::net::SocketAddr::V4(v4) => format!("/ip4/{}/tcp/{}/ws", v4.ip(), v4.port()),
        std::net::SocketAddr::V6(v6) => format!("/ip6/{}/tcp/{}/ws", v6.ip(), v6.port()),
    }
}
