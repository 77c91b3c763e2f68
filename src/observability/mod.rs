//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and serve loops produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → stdout (tracing fmt layer)
//!     → Prometheus scrape endpoint
//! ```

pub mod logging;
pub mod metrics;
