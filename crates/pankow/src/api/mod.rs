//! REST API server for Pankow OCR.
//!
//! Axum-based HTTP server exposing the OCR pipeline over two entry points
//! plus liveness endpoints.
//!
//! # Endpoints
//!
//! - `POST /ocr/url` - Recognize text in an image fetched from a URL (JSON body)
//! - `POST /ocr/file` - Recognize text in an uploaded image (multipart + query params)
//! - `GET /health` - Liveness check
//! - `GET /` - Index
//!
//! # cURL Examples
//!
//! ```bash
//! # Recognize from a URL, text only
//! curl -X POST http://localhost:8000/ocr/url \
//!      -H 'content-type: application/json' \
//!      -d '{"image_url": "https://example.com/sign.jpg", "langs": ["en"], "detail": 0}'
//!
//! # Recognize an uploaded file with boxes and confidences
//! curl -F "file=@scan.png" "http://localhost:8000/ocr/file?langs=es,en&detail=1"
//!
//! # Health check
//! curl http://localhost:8000/health
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{create_router, serve};
pub use types::{ApiState, ErrorBody, FileQuery, HealthResponse, IndexResponse, UrlPayload};
