//! Pankow - HTTP OCR service
//!
//! Pankow exposes an OCR engine over HTTP: submit an image by URL or file
//! upload and get back recognized text, word-line bounding boxes, and
//! confidence scores as JSON.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> pankow::Result<()> {
//!     pankow::api::serve("127.0.0.1", 8000).await
//! }
//! ```
//!
//! # Architecture
//!
//! - **Reader cache** (`ocr::ReaderCache`): one lazily-built OCR reader per
//!   (language set, accelerator flag) key, shared for the process lifetime.
//! - **Acquisition** (`fetch`): outbound image download with timeout and
//!   status-code classification.
//! - **Decode** (`decode`): bytes to a 3-channel RGB raster.
//! - **Pipeline** (`pipeline`): acquire -> decode -> recognize -> shape,
//!   factored once and shared by both endpoints.
//! - **API** (`api`): Axum router, request/response types, and the single
//!   place where errors become HTTP status codes.
//!
//! The engine seam is the `ocr::Reader`/`ocr::ReaderFactory` trait pair;
//! the default backend binds Tesseract via `kreuzberg-tesseract`.

#![deny(unsafe_code)]

pub mod api;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod ocr;
pub mod pipeline;
pub mod types;

pub use error::{PankowError, Result};
pub use ocr::{Reader, ReaderCache, ReaderFactory, ReaderKey, TesseractReaderFactory};
pub use pipeline::recognize_bytes;
pub use types::{BoundingBox, Detection, DetailLevel, OcrResponse};
