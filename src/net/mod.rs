//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! server.crt / server.key (PEM, on disk)
//!     → tls.rs (parse, build rustls ServerConfig)
//!     → TlsAcceptor (handshake per connection)
//!     → Hand off to HTTP layer with session details
//! ```

pub mod tls;
