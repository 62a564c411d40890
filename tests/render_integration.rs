//! End-to-end tests of `send()` against a mock render server

mod common;

use common::{bytes_response, json_response, refused_base_url, serve};
use rfrender::{Barcode, BarcodeType, Client, ClientConfig, Dither, Error, OutputFormat};
use serde_json::json;
use std::time::{Duration, Instant};

#[tokio::test]
async fn send_posts_payload_and_returns_bytes() {
    let (base, seen) = serve(|_| bytes_response(200, b"\x89PNG fake"));
    let client = Client::with_defaults(&base).unwrap();

    let bytes = client
        .render_html("<h1>Hi</h1>")
        .format(OutputFormat::Png)
        .dither(Dither::Ordered)
        .send()
        .await
        .expect("render should succeed");
    assert_eq!(bytes, b"\x89PNG fake");

    let req = seen.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/render");
    assert!(req
        .content_type
        .as_deref()
        .unwrap_or_default()
        .starts_with("application/json"));
    let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(
        body,
        json!({ "html": "<h1>Hi</h1>", "format": "png", "quantize": { "dither": "ordered" } })
    );
}

#[tokio::test]
async fn bytes_are_not_validated_against_format() {
    let (base, _seen) = serve(|_| bytes_response(200, b"definitely not a pdf"));
    let client = Client::with_defaults(&base).unwrap();
    let bytes = client.render_html("x").send().await.unwrap();
    assert_eq!(bytes, b"definitely not a pdf");
}

#[tokio::test]
async fn trailing_slash_targets_same_path() {
    let (base, seen) = serve(|_| bytes_response(200, b"ok"));
    let client = Client::with_defaults(&format!("{}/", base)).unwrap();
    client.render_url("https://example.com").send().await.unwrap();
    assert_eq!(seen.recv_timeout(Duration::from_secs(5)).unwrap().path, "/render");
}

#[tokio::test]
async fn server_error_uses_json_message() {
    let (base, _seen) = serve(|_| json_response(500, r#"{"error":"boom"}"#));
    let client = Client::with_defaults(&base).unwrap();
    let err = client.render_html("x").send().await.unwrap_err();
    match err {
        Error::ServerError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn server_error_without_json_falls_back_to_status() {
    let (base, _seen) = serve(|_| bytes_response(500, b"Internal Server Error"));
    let client = Client::with_defaults(&base).unwrap();
    let err = client.render_html("x").send().await.unwrap_err();
    assert!(err.is_server());
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), "HTTP 500");
}

#[tokio::test]
async fn refused_connection_is_connection_error() {
    let client = Client::with_defaults(&refused_base_url()).unwrap();
    let err = client.render_html("x").send().await.unwrap_err();
    assert!(err.is_connection(), "got {:?}", err);
    assert_eq!(err.status(), None);
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn timeout_is_connection_error() {
    let (base, _seen) = serve(|_| {
        std::thread::sleep(Duration::from_millis(1500));
        bytes_response(200, b"late")
    });
    let client = Client::new(&base, ClientConfig { timeout_ms: 200 }).unwrap();

    let started = Instant::now();
    let err = client.render_html("x").send().await.unwrap_err();
    assert!(err.is_connection(), "got {:?}", err);
    assert!(started.elapsed() < Duration::from_millis(1400));
}

#[tokio::test]
async fn repeated_send_resends_identical_payload() {
    let (base, seen) = serve(|_| bytes_response(200, b"ok"));
    let client = Client::with_defaults(&base).unwrap();
    let builder = client
        .render_html("x")
        .pdf_barcode(Barcode::new(BarcodeType::Ean13, "4006381333931"));

    builder.send().await.unwrap();
    builder.send().await.unwrap();

    let first = seen.recv_timeout(Duration::from_secs(5)).unwrap();
    let second = seen.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(first.body, second.body);
    let body: serde_json::Value = serde_json::from_str(&first.body).unwrap();
    assert_eq!(body["pdf"]["barcodes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn independent_builders_run_concurrently() {
    let (base, _seen) = serve(|req| bytes_response(200, req.body.as_bytes()));
    let client = Client::with_defaults(&base).unwrap();

    let builders: Vec<_> = (0..4)
        .map(|i| client.render_html(format!("<p>{}</p>", i)))
        .collect();
    let results = futures::future::join_all(builders.iter().map(|b| b.send())).await;

    for (i, result) in results.into_iter().enumerate() {
        let echoed: serde_json::Value = serde_json::from_slice(&result.unwrap()).unwrap();
        assert_eq!(echoed["html"], format!("<p>{}</p>", i));
    }
}

#[tokio::test]
async fn save_writes_artifact() {
    let (base, _seen) = serve(|_| bytes_response(200, b"%PDF-1.7"));
    let client = Client::with_defaults(&base).unwrap();
    let path = std::env::temp_dir().join(format!("rfrender-save-{}.pdf", std::process::id()));

    let written = client.render_html("x").save(&path).await.unwrap();
    assert_eq!(written, 8);
    assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7");
    let _ = std::fs::remove_file(&path);
}
