// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Equation recognition with bounded retry against rate limiting

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::error::RecognitionError;
use crate::vision::ImagePayload;

/// Instruction prompt sent with every recognition request
pub const RECOGNITION_PROMPT: &str = "You are a math OCR expert. Recognize the \
function equation in this image and output pure LaTeX only (for example \
y=x^2), with no other text.";

/// Total attempts per request, including the first
pub const MAX_ATTEMPTS: u32 = 3;

/// Backoff between attempts grows linearly: base * attempt number
pub const BASE_BACKOFF: Duration = Duration::from_secs(2);

/// One upstream generation call. The retry loop sits above this seam so
/// tests can script the failure sequence.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        image: &ImagePayload,
    ) -> Result<String, RecognitionError>;
}

/// Recognizer wrapping a backend with the retry policy
pub struct EquationRecognizer {
    backend: Arc<dyn VisionBackend>,
    max_attempts: u32,
    base_backoff: Duration,
}

impl EquationRecognizer {
    pub fn new(backend: Arc<dyn VisionBackend>) -> Self {
        Self {
            backend,
            max_attempts: MAX_ATTEMPTS,
            base_backoff: BASE_BACKOFF,
        }
    }

    /// Recognize the equation in an image, returning trimmed LaTeX text.
    ///
    /// Only `RateLimited` is retried: up to `max_attempts` total calls with
    /// a `base_backoff * attempt` cooldown sleep after every rate-limited
    /// attempt, the final one included, then `Busy`. A fully exhausted
    /// sequence therefore holds the request for 2+4+6 s of backoff. Every
    /// other failure propagates immediately.
    pub async fn recognize(&self, image: &ImagePayload) -> Result<String, RecognitionError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.backend.generate(RECOGNITION_PROMPT, image).await {
                Ok(text) => return Ok(text.trim().to_string()),
                Err(RecognitionError::RateLimited) => {
                    let delay = self.base_backoff * attempt;
                    warn!(
                        "Rate limited (attempt {}/{}), cooling down {:?}",
                        attempt, self.max_attempts, delay
                    );
                    tokio::time::sleep(delay).await;
                    if attempt >= self.max_attempts {
                        warn!("Still rate limited after {} attempts, giving up", attempt);
                        return Err(RecognitionError::Busy { attempts: attempt });
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }
}
