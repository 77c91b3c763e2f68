//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use netprobe::config::ProbeConfig;
use netprobe::http::HttpServer;
use netprobe::lifecycle::Shutdown;
use netprobe::net::tls::{self, TlsAcceptor};
use tokio::net::TcpListener;

/// Spawn a plaintext probe server on an ephemeral port.
///
/// Returns the bound address and the shutdown handle; dropping the handle
/// leaves the server running for the rest of the test process, so tests
/// keep it alive and trigger it when done (or just let the runtime die).
#[allow(dead_code)]
pub async fn spawn_server(config: ProbeConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    // Give the serve loop a moment to start accepting.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

/// Spawn a TLS probe server on an ephemeral port, loading certificate
/// material from the given PEM files.
#[allow(dead_code)]
pub async fn spawn_tls_server(
    config: ProbeConfig,
    cert_path: &Path,
    key_path: &Path,
) -> (SocketAddr, Shutdown) {
    let tls_config = tls::load_server_config(cert_path, key_path).unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(tls_config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run_tls(listener, acceptor, rx).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}
