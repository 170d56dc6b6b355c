//! Outbound image acquisition for the URL endpoint.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use crate::error::{PankowError, Result};

/// Bound on the whole outbound request, connect through body.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for downloading remote images.
///
/// Identifies itself with a browser-like user agent and an `Accept: image/*`
/// header; some origins reject requests without them. Built once and shared
/// across requests so connection pooling applies.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: reqwest::Client,
}

impl ImageFetcher {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        headers.insert(ACCEPT, HeaderValue::from_static("image/*,*/*;q=0.8"));

        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|e| PankowError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Download an image, classifying failures for the HTTP boundary.
    ///
    /// - HTTP 429 -> `RateLimited`
    /// - any other non-200 status, or a 200 with an empty body -> `Download`
    ///   with the status code in the message
    /// - transport failures (timeout, DNS, reset) -> `Download` with the
    ///   underlying error as source
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PankowError::download_failed_with_source(format!("failed to download image: {}", e), e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PankowError::rate_limited(url));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PankowError::download_failed_with_source(format!("failed to download image: {}", e), e))?;

        if status.as_u16() != 200 || body.is_empty() {
            return Err(PankowError::download_failed(format!(
                "failed to download image: HTTP {}",
                status.as_u16()
            )));
        }

        tracing::debug!(url, bytes = body.len(), "downloaded image");
        Ok(body.to_vec())
    }
}
