//! netprobe — diagnostic HTTP/HTTPS echo server.
//!
//! Reports connection metadata (client IP, method, path, protocol, TLS
//! version) back to the caller as JSON, and offers download/upload/status
//! endpoints for exercising network paths through proxies and VPN chains.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::ProbeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
