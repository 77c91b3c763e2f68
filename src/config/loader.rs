//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ProbeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProbeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ProbeConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_config_fills_defaults() {
        let file = write_config(
            r#"
            [http]
            bind_address = "127.0.0.1:8080"

            [https]
            enabled = false
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.http.bind_address, "127.0.0.1:8080");
        assert!(!config.https.enabled);
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.limits.max_body_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let file = write_config("http = [broken");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn invalid_config_is_a_validation_error() {
        let file = write_config(
            r#"
            [limits]
            max_body_bytes = 0
            "#,
        );
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_config(Path::new("/nonexistent/netprobe.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
