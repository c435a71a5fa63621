//! Network host for the account service.
//!
//! Serves the account method table over JSON-RPC on a single port that
//! accepts both HTTP and `WebSocket` connections. A permissive CORS layer
//! lets browser hosts reach it cross-origin; credentials are never allowed.

use std::net::SocketAddr;

use jsonrpsee::Methods;
use jsonrpsee::server::{Server, ServerHandle};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::error::{AccountServiceError, AccountServiceResult};

/// A running account server.
#[derive(Debug)]
pub struct AccountServer {
    handle: ServerHandle,
    addr: SocketAddr,
}

impl AccountServer {
    /// Bind `listen_addr` and start serving `methods`.
    ///
    /// Pass port `0` to let the OS pick a free port; the chosen address is
    /// available through [`AccountServer::local_addr`].
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Bind`] if the address cannot be bound.
    pub async fn start(
        listen_addr: SocketAddr,
        methods: impl Into<Methods>,
    ) -> AccountServiceResult<Self> {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        let middleware = tower::ServiceBuilder::new().layer(cors);

        let server = Server::builder()
            .set_http_middleware(middleware)
            .build(listen_addr)
            .await
            .map_err(|e| bind_error(listen_addr, &e))?;
        let addr = server
            .local_addr()
            .map_err(|e| bind_error(listen_addr, &e))?;

        let handle = server.start(methods);
        info!(addr = %addr, "account server started");

        Ok(Self { handle, addr })
    }

    /// The bound socket address.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://` URL of the server.
    #[must_use]
    pub fn http_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// `ws://` URL of the server.
    #[must_use]
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Signal the server to stop accepting connections.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::AlreadyStopped`] if called twice.
    pub fn stop(&self) -> AccountServiceResult<()> {
        self.handle
            .stop()
            .map_err(|_| AccountServiceError::AlreadyStopped)?;
        info!(addr = %self.addr, "account server stopping");
        Ok(())
    }

    /// Wait until the server has fully stopped.
    pub async fn stopped(self) {
        self.handle.stopped().await;
    }
}

fn bind_error(addr: SocketAddr, reason: &impl std::fmt::Display) -> AccountServiceError {
    AccountServiceError::Bind {
        addr: addr.to_string(),
        reason: reason.to_string(),
    }
}
