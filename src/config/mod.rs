//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProbeConfig (validated, immutable)
//!     → shared with both listeners at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload story
//! - All fields have defaults so the server runs with no config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{HttpConfig, HttpsConfig, ObservabilityConfig, ProbeConfig};
