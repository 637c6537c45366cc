//! The observed request and its console rendering.
//!
//! # Responsibilities
//! - Capture path, query parameters, headers, method and body of a request
//! - Parse the body as JSON, degrading to null on any failure
//! - Render the record as an indented block followed by a separator
//!
//! # Design Decisions
//! - Field order is fixed: path, params, headers, method, body
//! - Repeated query keys keep the first value
//! - Repeated headers are folded into one comma-separated value

use axum::http::{request::Parts, HeaderMap};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Indentation used when rendering a record.
pub const INDENT: &[u8] = b"    ";

/// Line printed after every record.
pub const SEPARATOR: &str = "----------------------------------------";

/// Snapshot of one incoming request, as echoed to the operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservedRequest {
    /// Request path without its leading slash.
    pub path: String,
    /// Decoded query parameters, first value wins.
    pub params: Map<String, Value>,
    /// Headers in received order with canonical names.
    pub headers: Map<String, Value>,
    /// Method token as received.
    pub method: String,
    /// Parsed JSON body, `None` when absent or not JSON.
    pub body: Option<Value>,
}

impl ObservedRequest {
    /// Build a record from request parts and the buffered body.
    pub fn from_parts(parts: &Parts, body: &[u8]) -> Self {
        let path = parts.uri.path();
        Self {
            path: path.strip_prefix('/').unwrap_or(path).to_string(),
            params: query_params(parts.uri.query()),
            headers: header_map(&parts.headers),
            method: parts.method.as_str().to_string(),
            body: parse_body(body),
        }
    }

    /// Render the record as a console block: pretty JSON, separator, blank line.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::with_capacity(256);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        self.serialize(&mut ser)?;

        let mut block = String::from_utf8_lossy(&buf).into_owned();
        block.push('\n');
        block.push_str(SEPARATOR);
        block.push_str("\n\n");
        Ok(block)
    }
}

/// Decode a query string into a name → value map.
pub fn query_params(query: Option<&str>) -> Map<String, Value> {
    let mut params = Map::new();
    if let Some(query) = query {
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params
                .entry(name.into_owned())
                .or_insert_with(|| Value::String(value.into_owned()));
        }
    }
    params
}

/// Collect headers under canonical names, folding repeated headers.
pub fn header_map(headers: &HeaderMap) -> Map<String, Value> {
    let mut out = Map::new();
    for name in headers.keys() {
        let value = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        out.insert(canonical_header_name(name.as_str()), Value::String(value));
    }
    out
}

/// `x-forwarded-for` → `X-Forwarded-For`.
pub fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Parse a body as JSON, yielding `None` for empty or malformed input.
pub fn parse_body(body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice(body).ok()
}
