//! netprobe — diagnostic HTTP/HTTPS echo server.
//!
//! Two independent listeners dispatch to a small set of stateless
//! handlers that format the incoming request's metadata into JSON and
//! write it back:
//!
//! ```text
//!     Client ──── :80 ───▶ axum router ──▶ echo / download / upload / status
//!     Client ──── :443 ──▶ TLS accept ──▶ echo (with negotiated TLS version)
//! ```
//!
//! Startup failure of either listener terminates the process; there is
//! no retry and no state to recover.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

use netprobe::config::{load_config, ProbeConfig};
use netprobe::http::HttpServer;
use netprobe::lifecycle::{signals, Shutdown};
use netprobe::net::tls;
use netprobe::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "netprobe", about = "Diagnostic HTTP/HTTPS echo server", version)]
struct Args {
    /// Path to a TOML config file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProbeConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        http = %config.http.bind_address,
        https = %config.https.bind_address,
        https_enabled = config.https.enabled,
        "netprobe starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    tokio::spawn(signals::watch(shutdown.clone()));

    let server = HttpServer::new(config.clone());

    // TLS material and bind errors surface here, before any traffic is
    // accepted, and are fatal.
    let tls_task = if config.https.enabled {
        let tls_config = tls::load_server_config(
            Path::new(&config.https.cert_path),
            Path::new(&config.https.key_path),
        )?;
        let acceptor = TlsAcceptor::from(Arc::new(tls_config));
        let listener = TcpListener::bind(&config.https.bind_address).await?;

        let server = server.clone();
        let rx = shutdown.subscribe();
        Some(tokio::spawn(async move {
            server.run_tls(listener, acceptor, rx).await
        }))
    } else {
        None
    };

    let listener = TcpListener::bind(&config.http.bind_address).await?;
    server.run(listener, shutdown.subscribe()).await?;

    if let Some(task) = tls_task {
        task.await??;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
