//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init observability → Bind listeners
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → listeners stop accepting → exit
//!
//! Signals (signals.rs):
//!     SIGTERM / Ctrl+C → trigger shutdown broadcast
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
