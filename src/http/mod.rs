//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route)
//!     → request.rs (buffer body within limit)
//!     → echo::record (build and render ObservedRequest)
//!     → echo::sink (write block)
//!     → 200, empty body
//! ```

pub mod request;
pub mod server;

pub use server::{AppState, HttpServer};
