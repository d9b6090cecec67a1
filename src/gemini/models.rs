// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Model enumeration and automatic selection
//!
//! The provider exposes a paged model catalog; at startup we pick one model
//! that supports content generation, preferring the cheap flash tier (it has
//! the most generous free quota, so it trips rate limits least).

use serde::Deserialize;

/// One entry from the provider's model catalog
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Fully qualified name, e.g. `models/gemini-1.5-flash`
    pub name: String,
    /// Generation methods this model supports
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

/// Catalog listing response
#[derive(Debug, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

impl ModelInfo {
    /// Whether this model can serve `generateContent` requests
    pub fn supports_generation(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }
}

/// Pick a model from the catalog using the fixed preference order:
/// a `gemini-1.5-flash` variant, then any non-`latest` flash model, then
/// the first model that supports generation at all.
pub fn select_model(models: &[ModelInfo]) -> Option<&ModelInfo> {
    let usable: Vec<&ModelInfo> = models.iter().filter(|m| m.supports_generation()).collect();

    usable
        .iter()
        .find(|m| m.name.contains("gemini-1.5-flash"))
        .or_else(|| {
            usable
                .iter()
                .find(|m| m.name.contains("flash") && !m.name.contains("latest"))
        })
        .or_else(|| usable.first())
        .copied()
}
