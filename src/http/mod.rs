//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP or TLS connection
//!     → server.rs (router construction, plaintext + TLS serve loops)
//!     → request.rs (request ID middleware)
//!     → handlers.rs (echo / download / upload / status)
//!     → report.rs (per-request metadata view, serialized as JSON)
//! ```

pub mod handlers;
pub mod report;
pub mod request;
pub mod server;

pub use request::{RequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
