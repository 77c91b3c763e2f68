//! TLS configuration and certificate loading.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::ServerConfig;

pub use tokio_rustls::TlsAcceptor;

/// Error type for TLS material loading.
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse PEM material in {path}: {source}")]
    Pem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no certificate found in {0}")]
    NoCertificate(PathBuf),

    #[error("no private key found in {0}")]
    NoPrivateKey(PathBuf),

    #[error("certificate/key pair rejected: {0}")]
    Rejected(#[from] rustls::Error),
}

/// Build a rustls server config from PEM certificate and key files.
///
/// ALPN advertises h2 and http/1.1; hyper's auto builder on the accept
/// side handles either.
pub fn load_server_config(cert_path: &Path, key_path: &Path) -> Result<ServerConfig, TlsError> {
    let mut cert_reader = BufReader::new(File::open(cert_path).map_err(|e| TlsError::Open {
        path: cert_path.to_path_buf(),
        source: e,
    })?);
    let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut cert_reader)
        .collect::<Result<_, _>>()
        .map_err(|e| TlsError::Pem {
            path: cert_path.to_path_buf(),
            source: e,
        })?;
    if certs.is_empty() {
        return Err(TlsError::NoCertificate(cert_path.to_path_buf()));
    }

    let mut key_reader = BufReader::new(File::open(key_path).map_err(|e| TlsError::Open {
        path: key_path.to_path_buf(),
        source: e,
    })?);
    let key: PrivateKeyDer<'static> = rustls_pemfile::private_key(&mut key_reader)
        .map_err(|e| TlsError::Pem {
            path: key_path.to_path_buf(),
            source: e,
        })?
        .ok_or_else(|| TlsError::NoPrivateKey(key_path.to_path_buf()))?;

    let mut config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_certificate_file_errors() {
        let result = load_server_config(Path::new("/nonexistent/server.crt"), Path::new("/nonexistent/server.key"));
        assert!(matches!(result, Err(TlsError::Open { .. })));
    }

    #[test]
    fn empty_pem_file_has_no_certificate() {
        let cert = tempfile::NamedTempFile::new().unwrap();
        let key = tempfile::NamedTempFile::new().unwrap();

        let result = load_server_config(cert.path(), key.path());
        assert!(matches!(result, Err(TlsError::NoCertificate(_))));
    }

    #[test]
    fn garbage_cert_with_no_pem_blocks_is_empty() {
        // rustls-pemfile skips non-PEM content rather than erroring, so a
        // text file ends up as an empty chain.
        let mut cert = tempfile::NamedTempFile::new().unwrap();
        cert.write_all(b"not a certificate at all\n").unwrap();
        let key = tempfile::NamedTempFile::new().unwrap();

        let result = load_server_config(cert.path(), key.path());
        assert!(matches!(result, Err(TlsError::NoCertificate(_))));
    }
}
