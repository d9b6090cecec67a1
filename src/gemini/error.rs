// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the recognition pipeline

use thiserror::Error;

/// Errors that can occur while recognizing an equation image upstream
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// Upstream provider throttled the request (HTTP 429). Retried locally;
    /// callers only ever see this from a single backend attempt.
    #[error("Rate limited by the model provider")]
    RateLimited,

    /// The local retry budget against rate limiting is exhausted
    #[error("Recognition service busy after {attempts} attempts")]
    Busy {
        /// Attempts made before giving up
        attempts: u32,
    },

    /// No usable generation model was found at startup
    #[error("No recognition model available")]
    ModelUnavailable,

    /// Non-429 error response from the provider
    #[error("Model API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the provider
        message: String,
    },

    /// Transport-level failure talking to the provider
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered 200 but returned no candidate text
    #[error("Model returned an empty response")]
    EmptyResponse,
}
