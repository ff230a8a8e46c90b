//! Byte-range behavior of the weights routes.

mod common;

use axum::body::Body;
use axum::http::header::HeaderName;
use axum::http::{Response, StatusCode, header};

use common::{
    ASSET_LEN, FakeLoader, app, body_bytes, expected_slice, get, get_range, send, write_asset,
};

fn header_str(response: &Response<Body>, name: HeaderName) -> &str {
    response.headers().get(name).unwrap().to_str().unwrap()
}

#[tokio::test]
async fn full_download_without_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_asset(dir.path());
    let app = app(FakeLoader::replying("", None), &path);

    for uri in ["/weights-asset", "/weights.bin"] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_str(&response, header::ACCEPT_RANGES), "bytes");
        assert_eq!(header_str(&response, header::CONTENT_LENGTH), "1000");
        assert_eq!(
            header_str(&response, header::CACHE_CONTROL),
            "public, max-age=31536000, immutable"
        );
        assert_eq!(body_bytes(response).await, expected_slice(0, ASSET_LEN - 1));
    }
}

#[tokio::test]
async fn explicit_range_returns_partial_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_asset(dir.path());
    let app = app(FakeLoader::replying("", None), &path);

    let response = send(&app, get_range("/weights-asset", "bytes=0-99")).await;
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(header_str(&response, header::CONTENT_RANGE), "bytes 0-99/1000");
    assert_eq!(header_str(&response, header::CONTENT_LENGTH), "100");
    assert_eq!(header_str(&response, header::ACCEPT_RANGES), "bytes");
    assert_eq!(body_bytes(response).await, expected_slice(0, 99));
}

#[tokio::test]
async fn open_ended_and_suffix_ranges() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_asset(dir.path());
    let app = app(FakeLoader::replying("", None), &path);

    let response = send(&app, get_range("/weights-asset", "bytes=900-")).await;
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(header_str(&response, header::CONTENT_RANGE), "bytes 900-999/1000");
    assert_eq!(body_bytes(response).await, expected_slice(900, 999));

    let response = send(&app, get_range("/weights.bin", "bytes=-50")).await;
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(header_str(&response, header::CONTENT_RANGE), "bytes 950-999/1000");
    assert_eq!(body_bytes(response).await, expected_slice(950, 999));
}

#[tokio::test]
async fn end_past_file_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_asset(dir.path());
    let app = app(FakeLoader::replying("", None), &path);

    let response = send(&app, get_range("/weights-asset", "bytes=990-5000")).await;
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(header_str(&response, header::CONTENT_RANGE), "bytes 990-999/1000");
    assert_eq!(body_bytes(response).await.len(), 10);
}

#[tokio::test]
async fn unsatisfiable_and_malformed_ranges_return_416() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_asset(dir.path());
    let app = app(FakeLoader::replying("", None), &path);

    for range in ["bytes=1000-1100", "bytes=abc", "bytes=50-10"] {
        let response = send(&app, get_range("/weights-asset", range)).await;
        assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE, "range: {range}");
        assert_eq!(header_str(&response, header::CONTENT_RANGE), "bytes */1000");
        assert!(body_bytes(response).await.is_empty());
    }
}

#[tokio::test]
async fn missing_asset_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(FakeLoader::replying("", None), &dir.path().join("absent.bin"));

    let response = send(&app, get("/weights-asset")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn serving_weights_never_loads_the_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_asset(dir.path());
    let loader = FakeLoader::replying("", None);
    let app = app(loader.clone(), &path);

    let _ = body_bytes(send(&app, get("/weights.bin")).await).await;
    assert_eq!(loader.loads(), 0);
}
