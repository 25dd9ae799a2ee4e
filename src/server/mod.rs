//! HTTP Server
//!
//! Accept loop serving the [`Router`] over HTTP/1.1, one task per
//! connection.
//!
//! ```text
//! TcpListener ──accept──▶ tokio::spawn ──▶ hyper http1 ──▶ Router::handle
//!                                                          │
//!                                          HealthService ◀─┘
//! ```

mod cors;
pub mod docs;
mod router;

use std::convert::Infallible;
use std::net::{SocketAddr, ToSocketAddrs};

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

pub use router::{HttpResponse, Router, REQUEST_ID_HEADER};

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_PORT: u16 = 8000;

/// Server bind settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host name or IP address to bind
    pub host: String,
    /// TCP port to bind
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Create a config for the given host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Resolve the bind address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| Error::Config(format!("Invalid bind address {}:{}: {}", self.host, self.port, e)))?
            .next()
            .ok_or_else(|| {
                Error::Config(format!(
                    "Bind address {}:{} resolved to nothing",
                    self.host, self.port
                ))
            })
    }
}

/// Bind a listener for the configured address.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let addr = config.socket_addr()?;
    TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind health API server on {}: {}", addr, e)))
}

/// Serve requests until `shutdown` is cancelled.
///
/// Accept and connection errors are logged; they never stop the loop.
pub async fn serve(listener: TcpListener, router: Router, shutdown: CancellationToken) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("Health API server listening on {}", addr);

    loop {
        let (stream, peer) = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutdown requested, no longer accepting connections");
                break;
            }
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    warn!("Health API server accept error: {}", e);
                    continue;
                }
            },
        };

        let io = TokioIo::new(stream);
        let router = router.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req: Request<Incoming>| {
                let router = router.clone();
                async move { Ok::<_, Infallible>(router.handle(req).await) }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                debug!(%peer, "Health API connection error: {}", e);
            }
        });
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.socket_addr().unwrap(), "0.0.0.0:8000".parse().unwrap());
    }

    #[test]
    fn test_ipv6_host() {
        let config = ServerConfig::new("::1", 9000);
        assert_eq!(config.socket_addr().unwrap(), "[::1]:9000".parse().unwrap());
    }

    #[test]
    fn test_invalid_host() {
        let config = ServerConfig::new("not a host name", 8000);
        assert_matches!(config.socket_addr(), Err(Error::Config(_)));
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let listener = bind(&ServerConfig::new("127.0.0.1", 0)).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }
}
