//! Core data model: detections, detail levels, and response shapes.

use serde::{Deserialize, Serialize};

/// Four integer (x, y) corner points, clockwise from top-left.
///
/// Coordinates are integers at the type level so geometry always serializes
/// as whole numbers regardless of what the engine produces internally.
pub type BoundingBox = [[i32; 2]; 4];

/// Build an axis-aligned bounding box from a left/top/width/height rectangle.
pub fn corners(left: i32, top: i32, width: i32, height: i32) -> BoundingBox {
    let right = left + width;
    let bottom = top + height;
    [[left, top], [right, top], [right, bottom], [left, bottom]]
}

/// One recognized region: geometry, text, and confidence in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
    pub text: String,
    pub conf: f64,
}

/// Response shape selector, parsed from the wire `detail` parameter.
///
/// `0` selects text only; any other value selects geometry + confidence,
/// matching the permissive handling of the original HTTP contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailLevel {
    TextOnly,
    TextWithGeometry,
}

impl DetailLevel {
    pub fn from_flag(value: u8) -> Self {
        if value == 0 {
            DetailLevel::TextOnly
        } else {
            DetailLevel::TextWithGeometry
        }
    }
}

/// Successful recognition response.
///
/// Serializes as `{"texts": [...]}` for text-only requests and as a bare
/// JSON array of detection objects otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OcrResponse {
    TextOnly { texts: Vec<String> },
    WithGeometry(Vec<Detection>),
}

impl OcrResponse {
    /// Shape a detection list according to the requested detail level.
    pub fn from_detections(detections: Vec<Detection>, detail: DetailLevel) -> Self {
        match detail {
            DetailLevel::TextOnly => OcrResponse::TextOnly {
                texts: detections.into_iter().map(|d| d.text).collect(),
            },
            DetailLevel::TextWithGeometry => OcrResponse::WithGeometry(detections),
        }
    }
}

/// Parse a comma-separated language list: trim whitespace around each code
/// and drop empty entries. `""` and `" , "` both yield an empty sequence.
pub fn parse_langs(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}
