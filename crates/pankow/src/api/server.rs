//! API server setup and configuration.

use std::net::{IpAddr, SocketAddr};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::{PankowError, Result};

use super::handlers::{health_handler, index_handler, ocr_file_handler, ocr_url_handler};
use super::types::ApiState;

/// Create the API router with all routes configured.
///
/// Public so the router can be embedded in a larger application and so
/// tests can drive it with an injected reader factory.
///
/// Uploads are read fully into memory with no size cap; Axum's default
/// body limit is disabled.
pub fn create_router(state: ApiState) -> Router {
    // Default allows all origins; set PANKOW_CORS_ORIGINS for production.
    let cors_layer = if let Ok(origins_str) = std::env::var("PANKOW_CORS_ORIGINS") {
        let origins: Vec<_> = origins_str
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
            .collect();

        if !origins.is_empty() {
            tracing::info!("CORS configured with {} explicit allowed origin(s)", origins.len());
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            tracing::warn!("PANKOW_CORS_ORIGINS set but empty/invalid - falling back to permissive CORS");
            CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
        }
    } else {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/ocr/url", post(ocr_url_handler))
        .route("/ocr/file", post(ocr_file_handler))
        .layer(DefaultBodyLimit::disable())
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server with the default Tesseract backend.
///
/// # Arguments
///
/// * `host` - IP address to bind to (e.g., "127.0.0.1" or "0.0.0.0")
/// * `port` - Port number to bind to (e.g., 8000)
///
/// # Examples
///
/// ```no_run
/// #[tokio::main]
/// async fn main() -> pankow::Result<()> {
///     pankow::api::serve("127.0.0.1", 8000).await
/// }
/// ```
pub async fn serve(host: impl AsRef<str>, port: u16) -> Result<()> {
    let state = ApiState::new()?;
    serve_with_state(host, port, state).await
}

/// Start the API server with explicit state (custom reader factory).
pub async fn serve_with_state(host: impl AsRef<str>, port: u16, state: ApiState) -> Result<()> {
    let ip: IpAddr = host
        .as_ref()
        .parse()
        .map_err(|e| PankowError::validation(format!("Invalid host address: {}", e)))?;

    let addr = SocketAddr::new(ip, port);
    let app = create_router(state);

    tracing::info!("Starting Pankow OCR server on http://{}:{}", ip, port);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(PankowError::Io)?;

    axum::serve(listener, app)
        .await
        .map_err(|e| PankowError::Other(e.to_string()))?;

    Ok(())
}
