//! Image decoding: raw bytes to a 3-channel RGB raster.

use image::RgbImage;

use crate::error::{PankowError, Result};

/// Decode bytes in any supported raster format into 3-channel RGB.
///
/// Grayscale and palette images expand to RGB; alpha channels are dropped,
/// not composited. Unrecognized or corrupt data yields `InvalidImage`,
/// which the HTTP layer maps to a 400 distinct from download failures.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| PankowError::invalid_image_with_source(format!("could not decode image: {}", e), e))?;
    Ok(img.to_rgb8())
}
