//! Integration tests for the TLS listener.

mod common;

use std::io::Write;

use netprobe::config::ProbeConfig;
use rcgen::{generate_simple_self_signed, CertifiedKey};
use serde_json::Value;

/// Self-signed certificate and key as PEM temp files.
///
/// The IP literal becomes an IP SAN, so clients connecting to
/// 127.0.0.1 pass hostname verification even when only chain
/// validation is disabled.
fn self_signed_material() -> (tempfile::NamedTempFile, tempfile::NamedTempFile) {
    let CertifiedKey { cert, signing_key } =
        generate_simple_self_signed(vec!["localhost".to_string(), "127.0.0.1".to_string()])
            .unwrap();

    let mut cert_file = tempfile::NamedTempFile::new().unwrap();
    cert_file.write_all(cert.pem().as_bytes()).unwrap();

    let mut key_file = tempfile::NamedTempFile::new().unwrap();
    key_file
        .write_all(signing_key.serialize_pem().as_bytes())
        .unwrap();

    (cert_file, key_file)
}

fn insecure_client() -> reqwest::Client {
    reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .build()
        .unwrap()
}

#[tokio::test]
async fn tls_listener_reports_negotiated_version() {
    let (cert, key) = self_signed_material();
    let (addr, _shutdown) =
        common::spawn_tls_server(ProbeConfig::default(), cert.path(), key.path()).await;

    let res = insecure_client()
        .get(format!("https://{addr}/"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["service"], "https");
    // rustls prefers 1.3 and any current client speaks it.
    assert_eq!(body["tls_version"], "TLS 1.3");
    assert_eq!(body["method"], "GET");
    assert_eq!(body["path"], "/");
    assert_eq!(body["client_ip"], "127.0.0.1");
    assert!(body["protocol"].is_string());
}

#[tokio::test]
async fn tls_listener_echoes_every_path() {
    let (cert, key) = self_signed_material();
    let (addr, _shutdown) =
        common::spawn_tls_server(ProbeConfig::default(), cert.path(), key.path()).await;
    let client = insecure_client();

    // Paths that dispatch to dedicated handlers on the plaintext listener
    // all echo here: the TLS listener has a single handler.
    for path in ["/status", "/download", "/nested/probe"] {
        let res = client
            .get(format!("https://{addr}{path}"))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), 200);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["service"], "https", "path {path} should echo");
        assert_eq!(body["path"], path);
        assert_eq!(body["tls_version"], "TLS 1.3");
    }
}
