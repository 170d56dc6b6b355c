//! The engine seam: reader and factory traits plus the cache key.

use std::sync::Arc;

use image::RgbImage;

use crate::error::Result;
use crate::types::Detection;

/// Cache key: ordered language codes plus the accelerator flag.
///
/// Equality and hashing are structural; `["es", "en"]` and `["en", "es"]`
/// are distinct keys, matching the contract that language order is
/// caller-controlled and opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReaderKey {
    pub languages: Vec<String>,
    pub accelerate: bool,
}

impl ReaderKey {
    pub fn new(languages: impl Into<Vec<String>>, accelerate: bool) -> Self {
        Self {
            languages: languages.into(),
            accelerate,
        }
    }
}

/// One instantiated OCR engine, bound to a single `ReaderKey`.
///
/// Implementations must be thread-safe; a reader is shared by every request
/// that hits its key. `read_text` is blocking (CPU or accelerator bound) and
/// is expected to run on the blocking pool.
pub trait Reader: Send + Sync {
    /// Recognize text in a decoded RGB raster.
    ///
    /// Returns detections in the engine's native order; callers must not
    /// re-sort them.
    fn read_text(&self, image: &RgbImage) -> Result<Vec<Detection>>;
}

/// Constructs readers for the cache.
///
/// `create` is blocking: constructing a reader may load models from disk or
/// network. Invalid language codes surface here as `ReaderInit` errors.
pub trait ReaderFactory: Send + Sync {
    fn create(&self, key: &ReaderKey) -> Result<Arc<dyn Reader>>;
}
