// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze endpoint response type

use serde::{Deserialize, Serialize};

/// Successful recognition result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    /// Raw LaTeX transcription from the vision model
    pub latex: String,
    /// Normalized expression for the plotting evaluator
    pub graph_fn: String,
}

impl AnalyzeResponse {
    pub fn new(latex: String, graph_fn: String) -> Self {
        Self {
            success: true,
            latex,
            graph_fn,
        }
    }
}
