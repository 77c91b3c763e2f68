//! Request handlers.
//!
//! Each handler is a leaf: it reads request fields, optionally reads a
//! body, formats a report, and writes the response. No shared mutable
//! state, no composition beyond listener → handler.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::http::report::{
    client_ip, protocol_label, EchoReport, ErrorBody, StatusReport, TlsSession, UploadReport,
    SERVICES,
};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Number of synthetic payload lines produced by `/download`.
const DOWNLOAD_LINES: usize = 100;

/// Echo handler: serves `/` and every otherwise-unmatched path.
///
/// On the TLS listener this is the only handler and additionally reports
/// the negotiated TLS version from the connection's request extension.
pub async fn echo(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
) -> impl IntoResponse {
    let start = Instant::now();
    let client_ip = client_ip(&peer);

    let report = EchoReport {
        service: state.service,
        client_ip: client_ip.clone(),
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        user_agent: request
            .headers()
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string(),
        timestamp: Utc::now().to_rfc3339(),
        protocol: protocol_label(request.version()),
        tls_version: request
            .extensions()
            .get::<TlsSession>()
            .map(|session| session.version),
    };

    tracing::info!(
        client_ip = %client_ip,
        method = %report.method,
        path = %report.path,
        service = state.service,
        "Echo request"
    );
    metrics::record_request("echo", &report.method, 200, start);

    Json(report)
}

/// Download handler: a fixed synthetic text payload, served as an
/// attachment so proxy path tests can measure a realistic transfer.
pub async fn download(ConnectInfo(peer): ConnectInfo<SocketAddr>) -> impl IntoResponse {
    let start = Instant::now();
    let client_ip = client_ip(&peer);

    let mut content = format!(
        "This is a test download file from {} at {}\n",
        client_ip,
        Utc::now().to_rfc3339()
    );
    for line in 1..=DOWNLOAD_LINES {
        content.push_str(&format!("Line {line}: Sample data for download test\n"));
    }

    tracing::info!(client_ip = %client_ip, bytes = content.len(), "Download request");
    metrics::record_request("download", "GET", 200, start);

    (
        [
            (header::CONTENT_TYPE, "application/octet-stream"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=test-download.txt",
            ),
        ],
        content,
    )
}

/// Upload handler: buffers the full request body and reports its size.
///
/// Non-POST methods get a 405 with an explanatory JSON body; a body that
/// cannot be read (including one over the configured limit) gets a 400.
pub async fn upload(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
) -> Response {
    let start = Instant::now();
    let client_ip = client_ip(&peer);

    if request.method() != Method::POST {
        tracing::warn!(
            client_ip = %client_ip,
            method = %request.method(),
            "Upload rejected: wrong method"
        );
        metrics::record_request("upload", request.method().as_str(), 405, start);
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(ErrorBody {
                error: "Method not allowed",
                expected: Some("POST"),
            }),
        )
            .into_response();
    }

    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let body = match axum::body::to_bytes(request.into_body(), state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(client_ip = %client_ip, error = %e, "Upload body unreadable");
            metrics::record_request("upload", "POST", 400, start);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: "Failed to read upload data",
                    expected: None,
                }),
            )
                .into_response();
        }
    };

    tracing::info!(client_ip = %client_ip, size = body.len(), "Upload request");
    metrics::record_request("upload", "POST", 200, start);

    Json(UploadReport {
        service: "upload",
        client_ip,
        uploaded_size: body.len(),
        content_type,
        timestamp: Utc::now().to_rfc3339(),
    })
    .into_response()
}

/// Status handler: the fixed service list plus server time and uptime.
pub async fn status(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> impl IntoResponse {
    let start = Instant::now();
    let client_ip = client_ip(&peer);

    tracing::info!(client_ip = %client_ip, "Status request");
    metrics::record_request("status", "GET", 200, start);

    Json(StatusReport {
        service: "status",
        client_ip,
        server_time: Utc::now().to_rfc3339(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        services: SERVICES,
        proxy_test: "ok",
    })
}
