//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, stderr)
//!
//! Echo records are not log events; they go through echo::sink.
//! ```

pub mod logging;
