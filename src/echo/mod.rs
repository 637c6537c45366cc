//! Request echo subsystem.
//!
//! # Data Flow
//! ```text
//! Request parts + buffered body
//!     → record.rs (ObservedRequest, JSON body parse, rendering)
//!     → sink.rs (atomic write of the rendered block)
//! ```

pub mod record;
pub mod sink;

pub use record::ObservedRequest;
pub use sink::{EchoSink, MemorySink, StdoutSink, WriterSink};
