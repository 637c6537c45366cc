//! End-to-end echo behavior over a real listener.

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::Method;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

mod common;

#[tokio::test]
async fn test_get_nested_path_with_query() {
    let (server, sink) = common::start_server().await;

    let res = common::client()
        .get(server.url("/foo/bar?x=1"))
        .header("Accept", "*/*")
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 200);
    assert!(res.bytes().await.unwrap().is_empty());

    let blocks = sink.blocks();
    assert_eq!(blocks.len(), 1);
    let record = common::parse_block(&blocks[0]);
    assert_eq!(record["path"], "foo/bar");
    assert_eq!(record["params"], json!({"x": "1"}));
    assert_eq!(record["headers"]["Accept"], "*/*");
    assert_eq!(record["headers"]["Host"], server.addr.to_string());
    assert_eq!(record["method"], "GET");
    assert_eq!(record["body"], Value::Null);
}

#[tokio::test]
async fn test_post_json_webhook() {
    let (server, sink) = common::start_server().await;

    let res = common::client()
        .post(server.url("/webhook"))
        .header("Content-Type", "application/json")
        .body(r#"{"event":"ping"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert!(res.bytes().await.unwrap().is_empty());

    let record = common::parse_block(&sink.blocks()[0]);
    assert_eq!(record["method"], "POST");
    assert_eq!(record["body"], json!({"event": "ping"}));
    assert_eq!(record["headers"]["Content-Type"], "application/json");
}

#[tokio::test]
async fn test_post_non_json_body() {
    let (server, sink) = common::start_server().await;

    let res = common::client()
        .post(server.url("/anything"))
        .body("not-json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert!(res.bytes().await.unwrap().is_empty());
    assert_eq!(common::parse_block(&sink.blocks()[0])["body"], Value::Null);
}

#[tokio::test]
async fn test_delete_without_query_or_body() {
    let (server, sink) = common::start_server().await;

    let res = common::client()
        .delete(server.url("/resource/42"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let record = common::parse_block(&sink.blocks()[0]);
    assert_eq!(record["path"], "resource/42");
    assert_eq!(record["params"], json!({}));
    assert_eq!(record["method"], "DELETE");
    assert_eq!(record["body"], Value::Null);
}

#[tokio::test]
async fn test_repeated_query_key_keeps_one_value() {
    let (server, sink) = common::start_server().await;

    let res = common::client()
        .get(server.url("/search?tag=a&tag=b&tag=c"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let record = common::parse_block(&sink.blocks()[0]);
    assert_eq!(record["params"], json!({"tag": "a"}));
}

#[tokio::test]
async fn test_json_body_with_any_content_type() {
    let (server, sink) = common::start_server().await;

    common::client()
        .put(server.url("/items/1"))
        .header("Content-Type", "text/plain")
        .body("[1, 2, {\"three\": null}]")
        .send()
        .await
        .unwrap();

    let record = common::parse_block(&sink.blocks()[0]);
    assert_eq!(record["body"], json!([1, 2, {"three": null}]));
}

#[tokio::test]
async fn test_all_standard_methods_succeed() {
    let (server, sink) = common::start_server().await;
    let client = common::client();
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
        Method::HEAD,
        Method::OPTIONS,
        Method::TRACE,
    ];

    for method in &methods {
        let res = client
            .request(method.clone(), server.url("/deep/a/b/c/d"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200, "method {}", method);
    }

    let blocks = sink.blocks();
    assert_eq!(blocks.len(), methods.len());
    for (block, method) in blocks.iter().zip(&methods) {
        let record = common::parse_block(block);
        assert_eq!(record["method"], method.as_str());
        assert_eq!(record["path"], "deep/a/b/c/d");
    }
}

#[tokio::test]
async fn test_record_key_order() {
    let (server, sink) = common::start_server().await;

    common::client().get(server.url("/order")).send().await.unwrap();

    let block = &sink.blocks()[0];
    let positions: Vec<usize> = ["\"path\"", "\"params\"", "\"headers\"", "\"method\"", "\"body\""]
        .iter()
        .map(|key| block.find(&format!("\n    {}", key)).expect("top-level key present"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

/// Send a raw HTTP/1.1 request and return the response status line.
async fn raw_status_line(addr: SocketAddr, request_line: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("{}\r\nHost: {}\r\n\r\n", request_line, addr);
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut chunk))
            .await
            .expect("response head within timeout")
            .unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&buf).into_owned();
    head.lines().next().unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_authority_and_asterisk_targets_are_echoed() {
    let (server, sink) = common::start_server().await;

    let connect = raw_status_line(server.addr, "CONNECT example.com:443 HTTP/1.1").await;
    assert!(connect.starts_with("HTTP/1.1 200"), "CONNECT answered {:?}", connect);
    assert_eq!(sink.len(), 1);
    assert_eq!(common::parse_block(&sink.blocks()[0])["method"], "CONNECT");

    let options = raw_status_line(server.addr, "OPTIONS * HTTP/1.1").await;
    assert!(options.starts_with("HTTP/1.1 200"), "OPTIONS * answered {:?}", options);
    assert_eq!(sink.len(), 2);
    let record = common::parse_block(&sink.blocks()[1]);
    assert_eq!(record["method"], "OPTIONS");
    assert_eq!(record["path"], "*");
}
