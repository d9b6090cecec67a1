// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use tracing::{debug, info, warn};

use super::response::AnalyzeResponse;
use crate::api::errors::ApiError;
use crate::api::server::AppState;
use crate::normalizer::normalize;
use crate::vision::ImagePayload;

/// POST /analyze - Recognize the equation in an uploaded image
///
/// Accepts a multipart form with an `image` file field, sends it to the
/// vision model, and returns the raw LaTeX next to the normalized plotting
/// expression.
///
/// # Errors
/// - 400: no `image` field, or an empty filename
/// - 429: upstream rate limiting survived the retry budget
/// - 500: no model configured, or any processing failure
pub async fn analyze_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    // Fail closed before touching the body when no model was selected.
    let recognizer = state.recognizer.as_ref().ok_or(ApiError::ModelUnavailable)?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Processing(format!("invalid multipart body: {}", e)))?
    {
        if field.name() == Some("image") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::Processing(format!("failed to read upload: {}", e)))?;
            upload = Some((file_name, data));
            break;
        }
    }

    let (file_name, data) = upload.ok_or(ApiError::MissingImage)?;
    if file_name.is_empty() {
        return Err(ApiError::EmptyFilename);
    }

    debug!("Analyze request: {} ({} bytes)", file_name, data.len());

    let payload = ImagePayload::from_bytes(&data).map_err(|e| {
        warn!("Rejecting upload {}: {}", file_name, e);
        ApiError::Processing(e.to_string())
    })?;

    let latex = recognizer.recognize(&payload).await.map_err(|e| {
        warn!("Recognition failed: {}", e);
        ApiError::from(e)
    })?;
    let graph_fn = normalize(&latex);

    info!("Recognized {:?} -> {:?}", latex, graph_fn);
    Ok(Json(AnalyzeResponse::new(latex, graph_fn)))
}

// Route wiring and status mapping are covered in tests/analyze_route.rs.
