//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones. Returns all
//! validation errors, not just the first, so a broken config can be
//! fixed in one pass.

use std::net::SocketAddr;

use crate::config::schema::ProbeConfig;

/// A single semantic problem found in a config.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid bind address `{address}` for {section}: {reason}")]
    InvalidBindAddress {
        section: &'static str,
        address: String,
        reason: String,
    },

    #[error("https listener is enabled but {field} is empty")]
    MissingTlsPath { field: &'static str },

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("unknown log level `{0}`")]
    InvalidLogLevel(String),
}

fn check_addr(
    section: &'static str,
    address: &str,
    errors: &mut Vec<ValidationError>,
) {
    if let Err(e) = address.parse::<SocketAddr>() {
        errors.push(ValidationError::InvalidBindAddress {
            section,
            address: address.to_string(),
            reason: e.to_string(),
        });
    }
}

/// Validate a config, collecting every problem found.
pub fn validate_config(config: &ProbeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_addr("http", &config.http.bind_address, &mut errors);

    if config.https.enabled {
        check_addr("https", &config.https.bind_address, &mut errors);
        if config.https.cert_path.is_empty() {
            errors.push(ValidationError::MissingTlsPath { field: "cert_path" });
        }
        if config.https.key_path.is_empty() {
            errors.push(ValidationError::MissingTlsPath { field: "key_path" });
        }
    }

    if config.observability.metrics_enabled {
        check_addr(
            "observability.metrics",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config
        .observability
        .log_level
        .parse::<tracing::Level>()
        .is_err()
    {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
