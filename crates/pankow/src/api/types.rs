//! API request and response types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fetch::ImageFetcher;
use crate::ocr::{ReaderCache, ReaderFactory, TesseractReaderFactory};

/// Request body for `POST /ocr/url`.
#[derive(Debug, Clone, Deserialize)]
pub struct UrlPayload {
    pub image_url: String,
    #[serde(default = "default_langs")]
    pub langs: Vec<String>,
    #[serde(default)]
    pub gpu: bool,
    #[serde(default = "default_detail")]
    pub detail: u8,
}

/// Query parameters for `POST /ocr/file`.
#[derive(Debug, Clone, Deserialize)]
pub struct FileQuery {
    #[serde(default = "default_langs_param")]
    pub langs: String,
    #[serde(default)]
    pub gpu: bool,
    #[serde(default = "default_detail")]
    pub detail: u8,
}

fn default_langs() -> Vec<String> {
    vec!["es".to_string(), "en".to_string()]
}

fn default_langs_param() -> String {
    "es,en".to_string()
}

fn default_detail() -> u8 {
    1
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Index response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    pub status: String,
    pub docs: String,
    pub health: String,
}

/// Error response body: `{"detail": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// API server state shared by all handlers.
#[derive(Clone)]
pub struct ApiState {
    pub cache: Arc<ReaderCache>,
    pub fetcher: Arc<ImageFetcher>,
}

impl ApiState {
    /// State with the default Tesseract backend.
    pub fn new() -> Result<Self> {
        Self::with_factory(Arc::new(TesseractReaderFactory::new()))
    }

    /// State with an injected reader factory; this is the test seam.
    pub fn with_factory(factory: Arc<dyn ReaderFactory>) -> Result<Self> {
        Ok(Self {
            cache: Arc::new(ReaderCache::new(factory)),
            fetcher: Arc::new(ImageFetcher::new()?),
        })
    }
}
