//! The recognition pipeline shared by the URL and file-upload endpoints:
//! decode -> acquire reader -> recognize -> shape.

use crate::decode::decode_rgb;
use crate::error::{PankowError, Result};
use crate::ocr::ReaderCache;
use crate::types::{DetailLevel, OcrResponse};

/// Run recognition over already-acquired image bytes.
///
/// Decode and recognition both run on the blocking pool; neither stalls the
/// async executor. No partial results: any stage error fails the whole
/// request.
pub async fn recognize_bytes(
    cache: &ReaderCache,
    bytes: Vec<u8>,
    languages: &[String],
    accelerate: bool,
    detail: DetailLevel,
) -> Result<OcrResponse> {
    let raster = tokio::task::spawn_blocking(move || decode_rgb(&bytes))
        .await
        .map_err(|e| PankowError::recognition(format!("decode task failed: {}", e)))??;

    let reader = cache.acquire(languages, accelerate).await?;

    let detections = tokio::task::spawn_blocking(move || reader.read_text(&raster))
        .await
        .map_err(|e| PankowError::recognition(format!("recognition task failed: {}", e)))??;

    Ok(OcrResponse::from_detections(detections, detail))
}
