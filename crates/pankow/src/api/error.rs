//! HTTP error mapping: the single place where pipeline errors become
//! status codes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::PankowError;

use super::types::ErrorBody;

/// An error ready to leave the API boundary.
///
/// Acquisition and decode failures are client errors (400, or 429 for an
/// origin rate limit); reader construction and recognition failures are
/// server errors (500) with the cause's message embedded.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn validation<S: Into<String>>(detail: S) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<PankowError> for ApiError {
    fn from(err: PankowError) -> Self {
        let status = match &err {
            PankowError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            PankowError::Download { .. }
            | PankowError::EmptyUpload
            | PankowError::InvalidImage { .. }
            | PankowError::Validation { .. } => StatusCode::BAD_REQUEST,
            PankowError::Io(_)
            | PankowError::Recognition { .. }
            | PankowError::ReaderInit { .. }
            | PankowError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, detail = %self.detail, "request failed");
        } else {
            tracing::debug!(status = %self.status, detail = %self.detail, "request rejected");
        }

        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}
