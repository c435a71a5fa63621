//! Web transport: the generated JSON-RPC client over HTTP or `WebSocket`.

use async_trait::async_trait;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::ws_client::{WsClient, WsClientBuilder};
use tern_account::{
    AccountRpcClient, AppStorageGetReply, AppStorageGetRequest, AppStoragePutRequest,
    AppStorageRemoveRequest,
};
use tokio::sync::OnceCell;
use tracing::{debug, warn};
use url::Url;

use super::{AccountClient, ClientOptions};
use crate::error::{AccountError, AccountResult};
use crate::transport::WebTransport;

/// How calls reach the target.
enum Channel {
    /// `http://` / `https://` target; the client connects per request.
    Http(HttpClient),
    /// `ws://` / `wss://` target; connected on first use.
    Ws {
        url: String,
        options: ClientOptions,
        client: OnceCell<WsClient>,
    },
    /// The target could not be turned into a client. Every call fails.
    Unreachable { reason: String },
}

/// A borrowed, connected client.
enum Connection<'a> {
    Http(&'a HttpClient),
    Ws(&'a WsClient),
}

/// Dispatch one generated-client method over whichever connection is open.
macro_rules! call {
    ($self:ident, $method:ident, $request:expr) => {{
        let result = match $self.connection().await? {
            Connection::Http(client) => AccountRpcClient::$method(client, $request).await,
            Connection::Ws(client) => AccountRpcClient::$method(client, $request).await,
        };
        result.map_err(AccountError::from_client_error)
    }};
}

/// Account client bound to a network target.
///
/// Construction never touches the network. An empty or malformed target is
/// accepted and reported as [`AccountError::Transport`] on every call.
pub struct RemoteAccountClient {
    host: String,
    channel: Channel,
}

impl std::fmt::Debug for RemoteAccountClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.channel {
            Channel::Http(_) => "http",
            Channel::Ws { .. } => "ws",
            Channel::Unreachable { .. } => "unreachable",
        };
        f.debug_struct("RemoteAccountClient")
            .field("host", &self.host)
            .field("channel", &kind)
            .finish()
    }
}

impl RemoteAccountClient {
    /// Bind a client to `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Config`] if the transport asks for credentials,
    /// which cross-origin account calls never send.
    pub fn new(transport: &WebTransport, options: ClientOptions) -> AccountResult<Self> {
        if transport.with_credentials {
            return Err(AccountError::Config(
                "credentialed cross-origin requests are not supported".to_string(),
            ));
        }

        let channel = open_channel(&transport.host, options);
        if let Channel::Unreachable { reason } = &channel {
            warn!(host = %transport.host, reason = %reason, "account service target is unreachable");
        }

        Ok(Self {
            host: transport.host.clone(),
            channel,
        })
    }

    /// The configured target.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    async fn connection(&self) -> AccountResult<Connection<'_>> {
        match &self.channel {
            Channel::Http(client) => Ok(Connection::Http(client)),
            Channel::Ws {
                url,
                options,
                client,
            } => {
                let client = client
                    .get_or_try_init(|| async {
                        debug!(url = %url, "connecting to account service");
                        WsClientBuilder::default()
                            .connection_timeout(options.connection_timeout)
                            .request_timeout(options.request_timeout)
                            .build(url)
                            .await
                            .map_err(|e| {
                                AccountError::Transport(format!(
                                    "failed to connect to account service at {url}: {e}"
                                ))
                            })
                    })
                    .await?;
                Ok(Connection::Ws(client))
            },
            Channel::Unreachable { reason } => Err(AccountError::Transport(format!(
                "account service at '{}' is unreachable: {reason}",
                self.host
            ))),
        }
    }
}

fn open_channel(host: &str, options: ClientOptions) -> Channel {
    let url = match Url::parse(host) {
        Ok(url) => url,
        Err(e) => {
            return Channel::Unreachable {
                reason: e.to_string(),
            };
        },
    };

    match url.scheme() {
        "ws" | "wss" => Channel::Ws {
            url: host.to_owned(),
            options,
            client: OnceCell::new(),
        },
        "http" | "https" => match HttpClientBuilder::default()
            .request_timeout(options.request_timeout)
            .build(host)
        {
            Ok(client) => Channel::Http(client),
            Err(e) => Channel::Unreachable {
                reason: e.to_string(),
            },
        },
        other => Channel::Unreachable {
            reason: format!("unsupported scheme '{other}'"),
        },
    }
}

#[async_trait]
impl AccountClient for RemoteAccountClient {
    async fn app_storage_put(&self, request: AppStoragePutRequest) -> AccountResult<()> {
        call!(self, app_storage_put, request)
    }

    async fn app_storage_remove(&self, request: AppStorageRemoveRequest) -> AccountResult<()> {
        call!(self, app_storage_remove, request)
    }

    async fn app_storage_get(
        &self,
        request: AppStorageGetRequest,
    ) -> AccountResult<AppStorageGetReply> {
        call!(self, app_storage_get, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web(host: &str) -> WebTransport {
        WebTransport {
            host: host.to_owned(),
            with_credentials: false,
        }
    }

    #[test]
    fn scheme_picks_channel() {
        let http = RemoteAccountClient::new(&web("http://127.0.0.1:1"), ClientOptions::default())
            .unwrap();
        assert!(matches!(http.channel, Channel::Http(_)));

        let ws = RemoteAccountClient::new(&web("ws://127.0.0.1:1"), ClientOptions::default())
            .unwrap();
        assert!(matches!(ws.channel, Channel::Ws { .. }));
        assert_eq!(ws.host(), "ws://127.0.0.1:1");
    }

    #[test]
    fn unsupported_or_empty_targets_are_unreachable() {
        for host in ["", "not a url", "ftp://127.0.0.1:1"] {
            let client = RemoteAccountClient::new(&web(host), ClientOptions::default()).unwrap();
            assert!(
                matches!(client.channel, Channel::Unreachable { .. }),
                "{host}"
            );
        }
    }

    #[tokio::test]
    async fn unreachable_target_reports_transport_error() {
        let client = RemoteAccountClient::new(&web(""), ClientOptions::default()).unwrap();
        let err = client
            .app_storage_get(AppStorageGetRequest {
                key: "k".into(),
                global: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Transport(ref msg) if msg.contains("unreachable")));
    }

    #[tokio::test]
    async fn refused_ws_connection_reports_transport_error() {
        // Port 9 (discard) is not served on loopback in test environments.
        let client =
            RemoteAccountClient::new(&web("ws://127.0.0.1:9"), ClientOptions::default()).unwrap();
        let err = client
            .app_storage_remove(AppStorageRemoveRequest {
                key: "k".into(),
                global: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Transport(_)));
    }
}
