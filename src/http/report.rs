//! Per-request metadata reports.
//!
//! The only data this server handles is the ephemeral view of the request
//! in flight: who connected, how, and over what protocol. These types are
//! that view, serialized back to the caller as JSON.

use std::net::SocketAddr;

use axum::http::Version;
use rustls::{ProtocolVersion, ServerConnection};
use serde::Serialize;

/// Fixed service list reported by `/status`. Deliberately constant even
/// when the listeners are bound elsewhere: path-testing scripts compare
/// against this exact list.
pub const SERVICES: [&str; 5] = ["http:80", "https:443", "download", "upload", "status"];

/// Echo response: the request as the server saw it.
#[derive(Debug, Clone, Serialize)]
pub struct EchoReport {
    pub service: &'static str,
    pub client_ip: String,
    pub method: String,
    pub path: String,
    pub user_agent: String,
    pub timestamp: String,
    pub protocol: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_version: Option<&'static str>,
}

/// Upload response: how much arrived and what it claimed to be.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReport {
    pub service: &'static str,
    pub client_ip: String,
    pub uploaded_size: usize,
    pub content_type: String,
    pub timestamp: String,
}

/// Status response with the fixed service list.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub service: &'static str,
    pub client_ip: String,
    pub server_time: String,
    pub uptime_secs: u64,
    pub services: [&'static str; 5],
    pub proxy_test: &'static str,
}

/// Body for 405/400 responses on the upload path.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<&'static str>,
}

/// Negotiated TLS session details, injected into request extensions by
/// the TLS serve loop.
#[derive(Debug, Clone)]
pub struct TlsSession {
    pub version: &'static str,
}

impl TlsSession {
    pub fn from_connection(conn: &ServerConnection) -> Self {
        Self {
            version: tls_version_label(conn.protocol_version()),
        }
    }
}

/// The peer address with the port stripped.
///
/// Forwarded headers are ignored on purpose: when probing a proxy or VPN
/// chain the interesting address is the last hop's, not the original
/// client's.
pub fn client_ip(peer: &SocketAddr) -> String {
    peer.ip().to_string()
}

pub fn protocol_label(version: Version) -> &'static str {
    if version == Version::HTTP_11 {
        "HTTP/1.1"
    } else if version == Version::HTTP_2 {
        "HTTP/2.0"
    } else if version == Version::HTTP_10 {
        "HTTP/1.0"
    } else if version == Version::HTTP_3 {
        "HTTP/3.0"
    } else if version == Version::HTTP_09 {
        "HTTP/0.9"
    } else {
        "unknown"
    }
}

pub fn tls_version_label(version: Option<ProtocolVersion>) -> &'static str {
    match version {
        Some(ProtocolVersion::TLSv1_0) => "TLS 1.0",
        Some(ProtocolVersion::TLSv1_1) => "TLS 1.1",
        Some(ProtocolVersion::TLSv1_2) => "TLS 1.2",
        Some(ProtocolVersion::TLSv1_3) => "TLS 1.3",
        Some(_) => "unknown",
        None => "none",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_ip_strips_port() {
        let v4: SocketAddr = "203.0.113.9:51423".parse().unwrap();
        assert_eq!(client_ip(&v4), "203.0.113.9");

        let v6: SocketAddr = "[2001:db8::1]:443".parse().unwrap();
        assert_eq!(client_ip(&v6), "2001:db8::1");
    }

    #[test]
    fn tls_version_labels() {
        assert_eq!(tls_version_label(Some(ProtocolVersion::TLSv1_2)), "TLS 1.2");
        assert_eq!(tls_version_label(Some(ProtocolVersion::TLSv1_3)), "TLS 1.3");
        assert_eq!(tls_version_label(None), "none");
        assert_eq!(tls_version_label(Some(ProtocolVersion::SSLv3)), "unknown");
    }

    #[test]
    fn echo_report_omits_tls_version_when_absent() {
        let report = EchoReport {
            service: "basic-http",
            client_ip: "127.0.0.1".into(),
            method: "GET".into(),
            path: "/".into(),
            user_agent: String::new(),
            timestamp: "2026-01-01T00:00:00+00:00".into(),
            protocol: "HTTP/1.1",
            tls_version: None,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("tls_version").is_none());
        assert_eq!(json["service"], "basic-http");
        assert_eq!(json["method"], "GET");
    }

    #[test]
    fn echo_report_includes_tls_version_when_present() {
        let report = EchoReport {
            service: "https",
            client_ip: "127.0.0.1".into(),
            method: "GET".into(),
            path: "/".into(),
            user_agent: String::new(),
            timestamp: "2026-01-01T00:00:00+00:00".into(),
            protocol: "HTTP/1.1",
            tls_version: Some("TLS 1.3"),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tls_version"], "TLS 1.3");
    }

    #[test]
    fn service_list_is_fixed() {
        assert_eq!(
            SERVICES,
            ["http:80", "https:443", "download", "upload", "status"]
        );
    }
}
