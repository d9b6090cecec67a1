// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image upload handling for the recognition pipeline

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use thiserror::Error;

/// Errors from handling an uploaded image
#[derive(Debug, Error)]
pub enum VisionError {
    /// The uploaded bytes carry no known image magic
    #[error("unrecognized image data: {0}")]
    UnrecognizedFormat(#[from] image::ImageError),
}

/// An uploaded image, sniffed and encoded for the inline-data API field
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// MIME type derived from the magic bytes, e.g. `image/png`
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

impl ImagePayload {
    /// Build a payload from raw upload bytes.
    ///
    /// The format is sniffed from the magic bytes; bytes that are not a
    /// recognizable image are rejected before any upstream call is made.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VisionError> {
        let format = image::guess_format(bytes)?;

        Ok(Self {
            mime_type: format.to_mime_type().to_string(),
            data: BASE64.encode(bytes),
        })
    }

    /// Decoded size in bytes (for logging)
    pub fn size_bytes(&self) -> usize {
        // 4 base64 chars per 3 bytes; close enough for log lines
        self.data.len() / 4 * 3
    }
}
