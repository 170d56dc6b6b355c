//! Integration tests for the image fetcher against a local origin server.

use std::net::SocketAddr;

use axum::{Router, http::StatusCode, routing::get};

use pankow::PankowError;
use pankow::fetch::ImageFetcher;

async fn spawn_origin(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_fetch_success_returns_bytes() {
    let addr = spawn_origin(Router::new().route("/img", get(|| async { vec![1u8, 2, 3, 4] }))).await;

    let fetcher = ImageFetcher::new().unwrap();
    let bytes = fetcher.fetch(&format!("http://{}/img", addr)).await.unwrap();
    assert_eq!(bytes, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_fetch_sends_browser_like_headers() {
    let addr = spawn_origin(Router::new().route(
        "/check",
        get(|headers: axum::http::HeaderMap| async move {
            let user_agent = headers
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            let accept = headers
                .get("accept")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();

            if user_agent.starts_with("Mozilla/5.0") && accept.starts_with("image/*") {
                (StatusCode::OK, vec![0u8])
            } else {
                (StatusCode::FORBIDDEN, Vec::new())
            }
        }),
    ))
    .await;

    let fetcher = ImageFetcher::new().unwrap();
    assert!(fetcher.fetch(&format!("http://{}/check", addr)).await.is_ok());
}

#[tokio::test]
async fn test_fetch_429_yields_rate_limited() {
    let addr = spawn_origin(Router::new().route("/x", get(|| async { StatusCode::TOO_MANY_REQUESTS }))).await;

    let fetcher = ImageFetcher::new().unwrap();
    let err = fetcher.fetch(&format!("http://{}/x", addr)).await.unwrap_err();
    assert!(matches!(err, PankowError::RateLimited { .. }));
}

#[tokio::test]
async fn test_fetch_404_yields_download_failed_with_status() {
    let addr = spawn_origin(Router::new().route("/x", get(|| async { StatusCode::NOT_FOUND }))).await;

    let fetcher = ImageFetcher::new().unwrap();
    let err = fetcher.fetch(&format!("http://{}/other", addr)).await.unwrap_err();

    assert!(matches!(err, PankowError::Download { .. }));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_fetch_empty_200_yields_download_failed() {
    let addr = spawn_origin(Router::new().route("/x", get(|| async { Vec::<u8>::new() }))).await;

    let fetcher = ImageFetcher::new().unwrap();
    let err = fetcher.fetch(&format!("http://{}/x", addr)).await.unwrap_err();

    assert!(matches!(err, PankowError::Download { .. }));
    assert!(err.to_string().contains("200"));
}

#[tokio::test]
async fn test_fetch_connection_refused_yields_download_failed() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = ImageFetcher::new().unwrap();
    let err = fetcher.fetch(&format!("http://{}/x", addr)).await.unwrap_err();
    assert!(matches!(err, PankowError::Download { .. }));
}
