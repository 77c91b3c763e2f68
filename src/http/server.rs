//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the axum routers for both listeners
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve the plaintext listener via `axum::serve`
//! - Serve the TLS listener via a manual accept loop so the negotiated
//!   TLS version can be read off the handshake and reported per request

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::connect_info::ConnectInfo,
    routing::{any, get},
    Router,
};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio_rustls::TlsAcceptor;
use tower::ServiceExt;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProbeConfig;
use crate::http::handlers;
use crate::http::report::TlsSession;
use crate::http::request::{RequestUuid, X_REQUEST_ID};

/// Shared read-only state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service label reported in echo responses ("basic-http" or "https").
    pub service: &'static str,
    /// Process start instant, for uptime reporting.
    pub started_at: Instant,
    /// Upper bound for buffered upload bodies.
    pub max_body_bytes: usize,
}

/// HTTP server for the probe endpoints.
///
/// Owns two routers sharing the same handler code: the plaintext router
/// with the full endpoint set, and the TLS router where every path goes
/// to the echo handler.
#[derive(Clone)]
pub struct HttpServer {
    plain_router: Router,
    tls_router: Router,
}

impl HttpServer {
    /// Create a new server with the given configuration.
    pub fn new(config: ProbeConfig) -> Self {
        let started_at = Instant::now();
        let plain_state = AppState {
            service: "basic-http",
            started_at,
            max_body_bytes: config.limits.max_body_bytes,
        };
        let tls_state = AppState {
            service: "https",
            ..plain_state.clone()
        };

        let plain_router = Self::build_router(&config, plain_state);
        let tls_router = Self::build_tls_router(&config, tls_state);

        Self {
            plain_router,
            tls_router,
        }
    }

    /// Plaintext router: static path dispatch, echo as the fallback.
    ///
    /// Later `.layer()` calls wrap earlier ones, so the request-id setter
    /// is outermost: the ID exists before tracing sees the request and
    /// the propagate layer can copy it onto the response.
    fn build_router(config: &ProbeConfig, state: AppState) -> Router {
        Router::new()
            .route("/download", get(handlers::download))
            .route("/status", get(handlers::status))
            .route("/upload", any(handlers::upload))
            .fallback(handlers::echo)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), RequestUuid))
    }

    /// TLS router: single handler, every path echoes.
    fn build_tls_router(config: &ProbeConfig, state: AppState) -> Router {
        Router::new()
            .fallback(handlers::echo)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), RequestUuid))
    }

    /// Serve the plaintext listener until the shutdown signal fires.
    pub async fn run(
        &self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP listener starting");

        let app = self
            .plain_router
            .clone()
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP listener stopped");
        Ok(())
    }

    /// Serve the TLS listener until the shutdown signal fires.
    ///
    /// Each accepted connection completes its handshake first; the
    /// negotiated protocol version is then attached to every request on
    /// that connection as a [`TlsSession`] extension.
    pub async fn run_tls(
        &self,
        listener: TcpListener,
        acceptor: TlsAcceptor,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTPS listener starting");

        loop {
            let (stream, peer) = tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok(pair) => pair,
                    Err(e) => {
                        tracing::warn!(error = %e, "Accept failed");
                        continue;
                    }
                },
                _ = shutdown.recv() => break,
            };

            let acceptor = acceptor.clone();
            let router = self.tls_router.clone();

            tokio::spawn(async move {
                let tls_stream = match acceptor.accept(stream).await {
                    Ok(s) => s,
                    Err(e) => {
                        tracing::debug!(peer = %peer, error = %e, "TLS handshake failed");
                        return;
                    }
                };

                let session = TlsSession::from_connection(tls_stream.get_ref().1);
                tracing::debug!(
                    peer = %peer,
                    tls_version = session.version,
                    "TLS connection established"
                );

                let service = service_fn(move |mut request: Request<Incoming>| {
                    let router = router.clone();
                    let session = session.clone();
                    async move {
                        request.extensions_mut().insert(ConnectInfo(peer));
                        request.extensions_mut().insert(session);
                        router.oneshot(request.map(Body::new)).await
                    }
                });

                let io = TokioIo::new(tls_stream);
                if let Err(e) = auto::Builder::new(TokioExecutor::new())
                    .serve_connection(io, service)
                    .await
                {
                    tracing::debug!(peer = %peer, error = %e, "Connection error");
                }
            });
        }

        tracing::info!("HTTPS listener stopped");
        Ok(())
    }
}
