//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::Arc;

use request_echo::echo::{EchoSink, MemorySink};
use request_echo::{EchoConfig, HttpServer, Shutdown};
use serde_json::Value;
use tokio::net::TcpListener;

/// A running echo server bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server echoing into `sink`.
pub async fn start_server_with(sink: Arc<dyn EchoSink>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = EchoConfig::default();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::with_sink(config, sink);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer { addr, shutdown }
}

/// Start a server echoing into a fresh in-memory sink.
#[allow(dead_code)]
pub async fn start_server() -> (TestServer, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let server = start_server_with(sink.clone()).await;
    (server, sink)
}

/// A client that never reuses pooled connections between tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Split a rendered block back into its JSON record.
#[allow(dead_code)]
pub fn parse_block(block: &str) -> Value {
    let json = block
        .strip_suffix("\n----------------------------------------\n\n")
        .expect("block ends with separator and blank line");
    serde_json::from_str(json).expect("record is valid JSON")
}
