//! HTTP server setup and the echo handler.
//!
//! # Responsibilities
//! - Create Axum Router with a catch-all route for every method
//! - Wire up middleware (tracing)
//! - Bind server to listener with graceful shutdown
//! - Echo each request to the configured sink and answer 200

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    routing::any,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::EchoConfig;
use crate::echo::{EchoSink, ObservedRequest, StdoutSink};
use crate::http::request::buffer_body;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub sink: Arc<dyn EchoSink>,
    pub max_body_size: usize,
}

/// HTTP server for the echo service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server that echoes to standard output.
    pub fn new(config: EchoConfig) -> Self {
        Self::with_sink(config, Arc::new(StdoutSink))
    }

    /// Create a server that echoes to the given sink.
    pub fn with_sink(config: EchoConfig, sink: Arc<dyn EchoSink>) -> Self {
        let state = AppState {
            sink,
            max_body_size: config.limits.max_body_size,
        };

        let router = Self::build_router(state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Targets that are not origin-form (`CONNECT host:443`, `OPTIONS *`)
    /// match no route and land on the fallback.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(echo_handler))
            .route("/", any(echo_handler))
            .fallback(echo_handler)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until a shutdown signal arrives on `shutdown`.
    ///
    /// In-flight requests are allowed to finish before this returns.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for serving without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Catch-all handler.
/// Writes one record per request and always answers 200 with an empty body.
async fn echo_handler(State(state): State<AppState>, request: Request<Body>) -> StatusCode {
    let (parts, body) = request.into_parts();
    let body = buffer_body(body, state.max_body_size).await;
    let observed = ObservedRequest::from_parts(&parts, &body);

    tracing::debug!(
        method = %observed.method,
        path = %observed.path,
        body_bytes = body.len(),
        "Echoing request"
    );

    match observed.render() {
        Ok(block) => {
            if let Err(e) = state.sink.write_block(&block) {
                tracing::warn!(error = %e, "Failed to write echo record");
            }
        }
        Err(e) => tracing::warn!(error = %e, "Failed to render echo record"),
    }

    StatusCode::OK
}
