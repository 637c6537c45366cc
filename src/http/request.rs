//! Request body buffering.
//!
//! # Responsibilities
//! - Buffer the request body up to the configured limit
//! - Turn read failures and oversized bodies into an empty body
//!
//! # Design Decisions
//! - Never rejects: an unreadable body is echoed as null, not a 4xx

use axum::body::{Body, Bytes};

/// Read a request body, returning empty bytes if it cannot be read in full.
pub async fn buffer_body(body: Body, limit: usize) -> Bytes {
    match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, limit, "Request body not buffered, echoing without body");
            Bytes::new()
        }
    }
}
