// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Endpoint error mapping
//!
//! Every failure is converted to a JSON body at the route boundary; nothing
//! is allowed to crash the process. Two body shapes exist, both inherited
//! from the original front-end contract: `{"error": ...}` for validation,
//! busy-service, and missing-model failures, and `{"success": false,
//! "error": ...}` for failures during request processing.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;
use thiserror::Error;

use crate::gemini::RecognitionError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Multipart body carried no `image` field
    #[error("No image uploaded")]
    MissingImage,

    /// `image` field present but the filename was empty
    #[error("No file selected")]
    EmptyFilename,

    /// Retry budget against upstream rate limiting exhausted
    #[error("Recognition service is busy (429), please wait a minute and retry")]
    ServiceBusy,

    /// No model was selected at startup; the node fails closed
    #[error("Recognition model is not configured")]
    ModelUnavailable,

    /// Any other failure while processing the request
    #[error("{0}")]
    Processing(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingImage | ApiError::EmptyFilename => StatusCode::BAD_REQUEST,
            ApiError::ServiceBusy => StatusCode::TOO_MANY_REQUESTS,
            ApiError::ModelUnavailable | ApiError::Processing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<RecognitionError> for ApiError {
    fn from(err: RecognitionError) -> Self {
        match err {
            RecognitionError::Busy { .. } => ApiError::ServiceBusy,
            RecognitionError::ModelUnavailable => ApiError::ModelUnavailable,
            other => ApiError::Processing(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::Processing(msg) => json!({ "success": false, "error": msg }),
            other => json!({ "error": other.to_string() }),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
