//! Error types for Pankow.
//!
//! Each pipeline stage (acquisition, decode, recognition, reader
//! construction) has its own variant so the HTTP layer can map failures to
//! status codes in exactly one place. The mapping itself lives in
//! `api::error`; nothing here knows about HTTP.
//!
//! System errors (`Io`) bubble up unchanged; application errors wrap the
//! underlying cause with a `#[source]` attribute so error chains survive.
use thiserror::Error;

/// Result type alias using `PankowError`.
pub type Result<T> = std::result::Result<T, PankowError>;

/// Main error type for all Pankow operations.
///
/// # Variants
///
/// - `Io` - File system and I/O errors (always bubble up)
/// - `RateLimited` - The image origin answered HTTP 429
/// - `Download` - Remote fetch failed (bad status, empty body, transport)
/// - `EmptyUpload` - Uploaded file had no bytes
/// - `InvalidImage` - Bytes could not be decoded as an image
/// - `Recognition` - The OCR engine failed on a raster
/// - `ReaderInit` - Constructing a reader for a language set failed
/// - `Validation` - Invalid request input
/// - `Other` - Catch-all for uncommon errors
#[derive(Debug, Error)]
pub enum PankowError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("origin returned HTTP 429 for {url} (rate limited); use /ocr/file with a local copy or try a different URL")]
    RateLimited { url: String },

    #[error("{message}")]
    Download {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("uploaded file is empty")]
    EmptyUpload,

    #[error("{message}")]
    InvalidImage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("OCR error: {message}")]
    Recognition {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("failed to initialize OCR reader: {message}")]
    ReaderInit {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{0}")]
    Other(String),
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        paste::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl PankowError {
    error_constructor!(download_failed, Download);
    error_constructor!(invalid_image, InvalidImage);
    error_constructor!(recognition, Recognition);
    error_constructor!(reader_init, ReaderInit);
    error_constructor!(validation, Validation);

    /// Create a RateLimited error for the given URL.
    pub fn rate_limited<S: Into<String>>(url: S) -> Self {
        Self::RateLimited { url: url.into() }
    }
}
