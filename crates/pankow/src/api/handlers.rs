//! API request handlers.

use axum::Json;
use axum::extract::{Multipart, Query, State};

use crate::error::PankowError;
use crate::pipeline::recognize_bytes;
use crate::types::{DetailLevel, OcrResponse, parse_langs};

use super::error::ApiError;
use super::types::{ApiState, FileQuery, HealthResponse, IndexResponse, UrlPayload};

/// Liveness endpoint.
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Index endpoint.
///
/// GET /
pub async fn index_handler() -> Json<IndexResponse> {
    Json(IndexResponse {
        status: "ok".to_string(),
        docs: "/docs".to_string(),
        health: "/health".to_string(),
    })
}

/// Recognize text in an image fetched from a URL.
///
/// POST /ocr/url
///
/// Body: `{image_url, langs = ["es","en"], gpu = false, detail = 1}`.
/// `detail = 0` returns `{"texts": [...]}`; anything else returns an array
/// of `{box, text, conf}` objects.
pub async fn ocr_url_handler(
    State(state): State<ApiState>,
    Json(payload): Json<UrlPayload>,
) -> Result<Json<OcrResponse>, ApiError> {
    let bytes = state.fetcher.fetch(&payload.image_url).await?;

    let response = recognize_bytes(
        &state.cache,
        bytes,
        &payload.langs,
        payload.gpu,
        DetailLevel::from_flag(payload.detail),
    )
    .await?;

    Ok(Json(response))
}

/// Recognize text in an uploaded image.
///
/// POST /ocr/file
///
/// Multipart `file` field carries the image; `langs` (comma-separated),
/// `gpu`, and `detail` arrive as query parameters. An empty upload is
/// rejected before any decode attempt.
pub async fn ocr_file_handler(
    State(state): State<ApiState>,
    Query(params): Query<FileQuery>,
    mut multipart: Multipart,
) -> Result<Json<OcrResponse>, ApiError> {
    let mut data = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(e.to_string()))?
    {
        if field.name() == Some("file") {
            data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(e.to_string()))?,
            );
        }
    }

    let Some(data) = data else {
        return Err(ApiError::validation("no 'file' field in multipart body"));
    };
    if data.is_empty() {
        return Err(PankowError::EmptyUpload.into());
    }

    let langs = parse_langs(&params.langs);
    let response = recognize_bytes(
        &state.cache,
        data.to_vec(),
        &langs,
        params.gpu,
        DetailLevel::from_flag(params.detail),
    )
    .await?;

    Ok(Json(response))
}
