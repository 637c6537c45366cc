//! Request Echo Server Library

pub mod cli;
pub mod config;
pub mod echo;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::EchoConfig;
pub use echo::{EchoSink, ObservedRequest};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
