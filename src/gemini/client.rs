// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generative Language API client for equation recognition

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::error::RecognitionError;
use super::models::{select_model, ModelList};
use super::recognizer::VisionBackend;
use crate::vision::ImagePayload;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

// --- generateContent serde structs ---

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    Text(String),
    InlineData(InlineData),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Client for the hosted vision model, bound to one selected model
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model_name: String,
}

impl GeminiClient {
    /// Create a client bound to a known model name (no catalog call)
    pub fn with_model(api_key: &str, model_name: &str) -> anyhow::Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key, model_name)
    }

    fn with_endpoint(endpoint: &str, api_key: &str, model_name: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "Gemini client configured: endpoint={}, model={}",
            endpoint, model_name
        );

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            model_name: model_name.to_string(),
        })
    }

    /// Enumerate the provider's model catalog and bind to the preferred
    /// generation-capable model. Fails with `ModelUnavailable` when the
    /// catalog has none.
    pub async fn discover(api_key: &str) -> Result<Self, RecognitionError> {
        Self::discover_at(DEFAULT_ENDPOINT, api_key).await
    }

    async fn discover_at(endpoint: &str, api_key: &str) -> Result<Self, RecognitionError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        let endpoint = endpoint.trim_end_matches('/').to_string();

        let url = format!("{}/v1beta/models", endpoint);
        debug!("Model discovery GET {}", url);

        let response = client
            .get(&url)
            .query(&[("key", api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(RecognitionError::Api { status, message });
        }

        let catalog: ModelList = response.json().await?;
        let selected = select_model(&catalog.models)
            .ok_or(RecognitionError::ModelUnavailable)?
            .name
            .clone();

        info!(
            "Selected recognition model {} ({} in catalog)",
            selected,
            catalog.models.len()
        );

        Self::with_endpoint(&endpoint, api_key, &selected)
            .map_err(|e| RecognitionError::Api {
                status: 0,
                message: e.to_string(),
            })
    }

    /// Get the bound model name
    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[async_trait]
impl VisionBackend for GeminiClient {
    /// One `generateContent` call: instruction prompt plus inline image.
    /// A 429 maps to `RateLimited` so the recognizer's retry loop can act
    /// on it; every other failure is terminal.
    async fn generate(
        &self,
        prompt: &str,
        image: &ImagePayload,
    ) -> Result<String, RecognitionError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text(prompt.to_string()),
                    Part::InlineData(InlineData {
                        mime_type: image.mime_type.clone(),
                        data: image.data.clone(),
                    }),
                ],
            }],
        };

        let url = format!(
            "{}/v1beta/{}:generateContent",
            self.endpoint, self.model_name
        );
        debug!("Recognition POST {} ({} byte image)", url, image.size_bytes());

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RecognitionError::RateLimited);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RecognitionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;
        let text: String = body
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(RecognitionError::EmptyResponse);
        }
        Ok(text)
    }
}
